// ABOUTME: Admin notification feed: listing, unread counting and mark-as-read
// ABOUTME: Entries are narrowed from loose API objects through the fail-closed item accessors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use crate::api::{unwrap_list, ApiRequest, ApiTransport};
use crate::constants::endpoints;
use crate::errors::{AppError, AppResult};
use crate::modules::ModuleItem;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// One admin notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminNotification {
    /// Identifier
    pub id: String,
    /// Short title
    pub title: Option<String>,
    /// Body text
    pub message: Option<String>,
    /// Category (`order`, `driver_alert`, ...)
    pub kind: Option<String>,
    /// Already read
    pub read: bool,
    /// Creation timestamp as sent by the server
    pub created_at: Option<String>,
}

impl AdminNotification {
    /// Narrow an API entity; entries without an id are skipped
    #[must_use]
    pub fn from_item(item: &ModuleItem) -> Option<Self> {
        let read = ["read", "is_read"]
            .iter()
            .find_map(|key| item.get(key))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Some(Self {
            id: item.id()?,
            title: item.text("title"),
            message: item.text("message").or_else(|| item.text("body")),
            kind: item.text("type"),
            read,
            created_at: item.text("created_at"),
        })
    }

    /// Title, falling back to the message
    #[must_use]
    pub fn headline(&self) -> &str {
        self.title
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Number of unread notifications
#[must_use]
pub fn unread_count(notifications: &[AdminNotification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

/// Admin notification endpoints
#[derive(Clone)]
pub struct NotificationsAdmin {
    transport: Arc<dyn ApiTransport>,
}

impl NotificationsAdmin {
    /// Client over `transport`
    #[must_use]
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Current notifications, newest first as returned by the server
    pub async fn list(&self) -> AppResult<Vec<AdminNotification>> {
        let body = self.transport.request(ApiRequest::get(endpoints::NOTIFICATIONS)).await?;
        let notifications: Vec<_> = unwrap_list(body)
            .iter()
            .filter_map(AdminNotification::from_item)
            .collect();
        debug!(
            count = notifications.len(),
            unread = unread_count(&notifications),
            "Notifications fetched"
        );
        Ok(notifications)
    }

    /// Mark one notification as read
    pub async fn mark_read(&self, id: &str) -> AppResult<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::invalid_input("Notification id cannot be empty"));
        }
        let path = format!("{}/{}/read", endpoints::NOTIFICATIONS, urlencoding::encode(id));
        self.transport.request(ApiRequest::patch(path, None)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_item_accepts_both_read_keys() {
        let a = ModuleItem::from_value(json!({"id": 1, "is_read": true, "body": "x"})).unwrap_or_default();
        let b = ModuleItem::from_value(json!({"id": "n2", "title": "Alerte"})).unwrap_or_default();
        let parsed: Vec<_> = [a, b].iter().filter_map(AdminNotification::from_item).collect();
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].read);
        assert_eq!(parsed[0].headline(), "x");
        assert_eq!(unread_count(&parsed), 1);
    }
}
