// ABOUTME: Normalizes backend error bodies into one message plus field-scoped validation errors
// ABOUTME: Accepts `errors` as an array ({msg, param}) or an object ({field: msg | [msgs]})
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use crate::constants::messages;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One validation error reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Human-readable message
    pub message: String,
    /// Field the error applies to, when the backend scoped it
    pub field: Option<String>,
}

impl FieldError {
    /// Error scoped to a field
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Error not tied to any field
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }
}

/// Turn a backend error body into a banner message and a list of field errors
///
/// The message is taken from `message`, then `error`, then the joined field
/// error messages, then a default derived from the status code.
#[must_use]
pub fn normalize_error_body(status: u16, body: Option<&Value>) -> (String, Vec<FieldError>) {
    let field_errors = body
        .and_then(|b| b.get("errors"))
        .map(collect_field_errors)
        .unwrap_or_default();

    let explicit = body.and_then(|b| {
        ["message", "error"]
            .iter()
            .filter_map(|key| b.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|m| !m.is_empty())
            .map(str::to_owned)
    });

    let message = explicit
        .or_else(|| {
            (!field_errors.is_empty()).then(|| {
                field_errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
        })
        .unwrap_or_else(|| default_message(status).to_owned());

    (message, field_errors)
}

fn collect_field_errors(errors: &Value) -> Vec<FieldError> {
    match errors {
        Value::Array(entries) => entries.iter().filter_map(array_entry).collect(),
        Value::Object(map) => map
            .iter()
            .flat_map(|(field, value)| object_entry(field, value))
            .collect(),
        Value::String(message) if !message.trim().is_empty() => {
            vec![FieldError::general(message.trim())]
        }
        _ => Vec::new(),
    }
}

fn array_entry(entry: &Value) -> Option<FieldError> {
    if let Some(message) = entry.as_str() {
        return Some(FieldError::general(message));
    }
    let message = ["msg", "message"]
        .iter()
        .find_map(|key| entry.get(*key).and_then(Value::as_str))?;
    let field = ["param", "path", "field"]
        .iter()
        .find_map(|key| entry.get(*key).and_then(Value::as_str))
        .filter(|f| !f.is_empty())
        .map(str::to_owned);
    Some(FieldError {
        message: message.to_owned(),
        field,
    })
}

fn object_entry(field: &str, value: &Value) -> Vec<FieldError> {
    match value {
        Value::String(message) => vec![FieldError::for_field(field, message.as_str())],
        Value::Array(messages) => messages
            .iter()
            .filter_map(|m| {
                m.as_str()
                    .or_else(|| m.get("message").and_then(Value::as_str))
                    .map(|msg| FieldError::for_field(field, msg))
            })
            .collect(),
        Value::Object(_) => value
            .get("message")
            .or_else(|| value.get("msg"))
            .and_then(Value::as_str)
            .map(|msg| vec![FieldError::for_field(field, msg)])
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

const fn default_message(status: u16) -> &'static str {
    match status {
        401 => messages::SESSION_EXPIRED,
        403 => messages::ACCESS_DENIED,
        404 => messages::NOT_FOUND,
        _ => messages::REQUEST_FAILED,
    }
}
