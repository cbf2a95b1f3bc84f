// ABOUTME: Decoding of live Socket.IO events into typed events and UI toasts
// ABOUTME: The socket connection itself is external; this module only parses event packets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

//! # Realtime events
//!
//! The live channel delivers Socket.IO event packets such as
//! `42["new_notification",{...}]`, optionally namespaced (`42/admin,[...]`)
//! and optionally carrying an acknowledgement id (`4217[...]`).

use crate::constants::limits;
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use thiserror::Error;

const EVENT_PACKET_PREFIX: &str = "42";

/// Event names emitted by the backend
pub mod event_names {
    /// New admin notification
    pub const NEW_NOTIFICATION: &str = "new_notification";
    /// Driver raised an alert
    pub const DRIVER_ALERT: &str = "driver_alert";
    /// Driver position changed
    pub const DRIVER_LOCATION_UPDATE: &str = "driver:location_update";
}

/// Packet decoding failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PacketError {
    /// Not an event packet (ping, connect, ack, ...)
    #[error("not a Socket.IO event packet")]
    NotAnEvent,
    /// Event body is not a JSON array starting with an event name
    #[error("malformed event body: {0}")]
    Malformed(String),
    /// Known event with a payload missing required data
    #[error("invalid payload for {event}: {reason}")]
    InvalidPayload {
        /// Event name
        event: String,
        /// What was missing
        reason: &'static str,
    },
}

/// A decoded live event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RealtimeEvent {
    /// New admin notification
    NewNotification {
        /// Notification title
        title: Option<String>,
        /// Notification body
        message: Option<String>,
        /// Raw payload
        payload: Value,
    },
    /// Driver alert
    DriverAlert {
        /// Driver concerned
        driver_id: Option<String>,
        /// Alert text
        message: Option<String>,
        /// Raw payload
        payload: Value,
    },
    /// Driver position
    DriverLocationUpdate {
        /// Driver concerned
        driver_id: String,
        /// Latitude
        lat: f64,
        /// Longitude
        lng: f64,
    },
    /// Any other event
    Other {
        /// Event name
        name: String,
        /// Raw payload
        payload: Value,
    },
}

/// Decode one raw Socket.IO packet
pub fn parse_packet(raw: &str) -> Result<RealtimeEvent, PacketError> {
    let mut body = raw
        .trim()
        .strip_prefix(EVENT_PACKET_PREFIX)
        .ok_or(PacketError::NotAnEvent)?;

    if body.starts_with('/') {
        let comma = body
            .find(',')
            .ok_or_else(|| PacketError::Malformed("namespace without separator".into()))?;
        body = &body[comma + 1..];
    }
    let body = body.trim_start_matches(|c: char| c.is_ascii_digit());

    let parts: Vec<Value> =
        serde_json::from_str(body).map_err(|e| PacketError::Malformed(e.to_string()))?;
    let mut parts = parts.into_iter();
    let name = match parts.next() {
        Some(Value::String(name)) => name,
        _ => return Err(PacketError::Malformed("missing event name".into())),
    };
    let payload = parts.next().unwrap_or(Value::Null);
    decode_event(name, payload)
}

/// Build a typed event from its name and payload
pub fn decode_event(name: String, payload: Value) -> Result<RealtimeEvent, PacketError> {
    match name.as_str() {
        event_names::NEW_NOTIFICATION => Ok(RealtimeEvent::NewNotification {
            title: text(&payload, &["title"]),
            message: text(&payload, &["message", "body"]),
            payload,
        }),
        event_names::DRIVER_ALERT => Ok(RealtimeEvent::DriverAlert {
            driver_id: text(&payload, &["driverId", "driver_id"]),
            message: text(&payload, &["message", "reason"]),
            payload,
        }),
        event_names::DRIVER_LOCATION_UPDATE => {
            let invalid = |reason| PacketError::InvalidPayload {
                event: name.clone(),
                reason,
            };
            Ok(RealtimeEvent::DriverLocationUpdate {
                driver_id: text(&payload, &["driverId", "driver_id"]).ok_or_else(|| invalid("driver id"))?,
                lat: coordinate(&payload, &["lat", "latitude"]).ok_or_else(|| invalid("latitude"))?,
                lng: coordinate(&payload, &["lng", "lon", "longitude"]).ok_or_else(|| invalid("longitude"))?,
            })
        }
        _ => Ok(RealtimeEvent::Other { name, payload }),
    }
}

fn text(payload: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match payload.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn coordinate(payload: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| match payload.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .filter(|c| c.is_finite())
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    /// Informational
    Info,
    /// Needs attention
    Warning,
}

/// A transient popup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    /// Severity
    pub level: ToastLevel,
    /// Heading
    pub title: String,
    /// Body
    pub message: String,
}

impl Toast {
    /// Toast for an event; location updates and unknown events produce none
    #[must_use]
    pub fn from_event(event: &RealtimeEvent) -> Option<Self> {
        match event {
            RealtimeEvent::NewNotification { title, message, .. } => Some(Self {
                level: ToastLevel::Info,
                title: title.clone().unwrap_or_else(|| "Nouvelle notification".to_owned()),
                message: message.clone().unwrap_or_default(),
            }),
            RealtimeEvent::DriverAlert {
                driver_id, message, ..
            } => Some(Self {
                level: ToastLevel::Warning,
                title: driver_id
                    .as_ref()
                    .map_or_else(|| "Alerte livreur".to_owned(), |id| format!("Alerte livreur {id}")),
                message: message.clone().unwrap_or_default(),
            }),
            RealtimeEvent::DriverLocationUpdate { .. } | RealtimeEvent::Other { .. } => None,
        }
    }
}

/// Bounded FIFO of toasts; the oldest is dropped when full
#[derive(Debug, Clone)]
pub struct ToastQueue {
    capacity: usize,
    toasts: VecDeque<Toast>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::with_capacity(limits::TOAST_QUEUE_CAPACITY)
    }
}

impl ToastQueue {
    /// Queue holding at most `capacity` toasts (at least one)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            toasts: VecDeque::with_capacity(capacity),
        }
    }

    /// Queue a toast, returning the one evicted to make room
    pub fn push(&mut self, toast: Toast) -> Option<Toast> {
        let evicted = if self.toasts.len() >= self.capacity {
            self.toasts.pop_front()
        } else {
            None
        };
        self.toasts.push_back(toast);
        evicted
    }

    /// Queue the toast of an event, if it has one
    pub fn push_event(&mut self, event: &RealtimeEvent) -> bool {
        Toast::from_event(event).map(|toast| self.push(toast)).is_some()
    }

    /// Oldest toast
    pub fn pop(&mut self) -> Option<Toast> {
        self.toasts.pop_front()
    }

    /// Queued toasts, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Queued count
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Nothing queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
