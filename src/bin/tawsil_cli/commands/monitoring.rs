// ABOUTME: Monitoring overview command, one-shot or refreshed until Ctrl-C
// ABOUTME: Prints the server-reported document without interpretation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use super::transport;
use crate::helpers::display;
use anyhow::Result;
use tawsil_admin::config::environment::AdminConfig;
use tawsil_admin::dashboard::{MonitoringAdmin, Poller};
use tracing::warn;

/// Print the monitoring overview, optionally refreshing it
pub async fn overview(config: &AdminConfig, watch: bool) -> Result<()> {
    let admin = MonitoringAdmin::new(transport(config)?);
    if !watch {
        display::print_document(&admin.overview().await?);
        return Ok(());
    }

    let poller = Poller::spawn("monitoring", config.poll.monitoring, move || {
        let admin = admin.clone();
        async move {
            match admin.overview().await {
                Ok(overview) => display::print_document(&overview),
                Err(e) => warn!(error = %e, "Monitoring refresh failed"),
            }
        }
    });
    tokio::signal::ctrl_c().await?;
    poller.stop().await;
    Ok(())
}
