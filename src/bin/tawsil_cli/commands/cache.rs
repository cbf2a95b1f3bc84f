// ABOUTME: Server cache commands: statistics, flush, pattern invalidation and live view
// ABOUTME: Watch mode refreshes on the configured cache period until Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use super::transport;
use crate::helpers::display;
use anyhow::Result;
use tawsil_admin::config::environment::AdminConfig;
use tawsil_admin::dashboard::{CacheAdmin, Poller};
use tracing::warn;

/// Print cache statistics once
pub async fn stats(config: &AdminConfig) -> Result<()> {
    let admin = CacheAdmin::new(transport(config)?);
    display::print_cache_stats(&admin.stats().await?);
    Ok(())
}

/// Flush the server cache
pub async fn clear(config: &AdminConfig) -> Result<()> {
    let admin = CacheAdmin::new(transport(config)?);
    let message = admin.clear().await?;
    display::print_success(message.as_deref().unwrap_or("Cache vidé"));
    Ok(())
}

/// Invalidate entries matching `pattern`
pub async fn invalidate(config: &AdminConfig, pattern: &str) -> Result<()> {
    let admin = CacheAdmin::new(transport(config)?);
    let message = admin.invalidate(pattern).await?;
    display::print_success(message.as_deref().unwrap_or("Entrées invalidées"));
    Ok(())
}

/// Refresh statistics until interrupted
pub async fn watch(config: &AdminConfig) -> Result<()> {
    let admin = CacheAdmin::new(transport(config)?);
    let poller = Poller::spawn("cache_stats", config.poll.cache_stats, move || {
        let admin = admin.clone();
        async move {
            match admin.stats().await {
                Ok(stats) => display::print_cache_stats(&stats),
                Err(e) => warn!(error = %e, "Cache statistics refresh failed"),
            }
        }
    });
    tokio::signal::ctrl_c().await?;
    poller.stop().await;
    Ok(())
}
