// ABOUTME: Dashboard viewers over server-reported state: cache, monitoring, notifications
// ABOUTME: Each viewer is a thin client; Poller refreshes them on a fixed period
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

/// Server cache statistics and controls
pub mod cache_admin;
/// Monitoring overview
pub mod monitoring;
/// Admin notification feed
pub mod notifications;
/// Fixed-period refresh loop
pub mod poller;

pub use cache_admin::{CacheAdmin, CacheStats};
pub use monitoring::MonitoringAdmin;
pub use notifications::{unread_count, AdminNotification, NotificationsAdmin};
pub use poller::Poller;

use serde_json::Value;

/// Unwrap a `{data: ...}` envelope; other bodies pass through
pub(crate) fn unwrap_data(body: Option<Value>) -> Option<Value> {
    match body {
        Some(Value::Object(mut map)) if map.contains_key("data") => map.remove("data"),
        other => other,
    }
}
