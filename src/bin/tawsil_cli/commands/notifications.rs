// ABOUTME: Admin notification commands: list, mark as read and live view
// ABOUTME: Watch mode only prints notifications not seen in an earlier refresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use super::transport;
use crate::helpers::display;
use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tawsil_admin::config::environment::AdminConfig;
use tawsil_admin::dashboard::{unread_count, NotificationsAdmin, Poller};
use tokio::sync::Mutex;
use tracing::warn;

/// List notifications
pub async fn list(config: &AdminConfig, unread_only: bool) -> Result<()> {
    let admin = NotificationsAdmin::new(transport(config)?);
    let notifications = admin.list().await?;
    let unread = unread_count(&notifications);
    let shown: Vec<_> = notifications
        .into_iter()
        .filter(|n| !unread_only || !n.read)
        .collect();
    display::print_notifications(&shown, unread);
    Ok(())
}

/// Mark one notification as read
pub async fn read(config: &AdminConfig, id: &str) -> Result<()> {
    let admin = NotificationsAdmin::new(transport(config)?);
    admin.mark_read(id).await?;
    display::print_success("Notification marquée comme lue");
    Ok(())
}

/// Print new notifications until interrupted
pub async fn watch(config: &AdminConfig) -> Result<()> {
    let admin = NotificationsAdmin::new(transport(config)?);
    let seen = Arc::new(Mutex::new(HashSet::new()));
    let poller = Poller::spawn("notifications", config.poll.notifications, move || {
        let admin = admin.clone();
        let seen = Arc::clone(&seen);
        async move {
            match admin.list().await {
                Ok(notifications) => {
                    let unread = unread_count(&notifications);
                    let mut seen = seen.lock().await;
                    let fresh: Vec<_> = notifications
                        .into_iter()
                        .filter(|n| seen.insert(n.id.clone()))
                        .collect();
                    if !fresh.is_empty() {
                        display::print_notifications(&fresh, unread);
                    }
                }
                Err(e) => warn!(error = %e, "Notifications refresh failed"),
            }
        }
    });
    tokio::signal::ctrl_c().await?;
    poller.stop().await;
    Ok(())
}
