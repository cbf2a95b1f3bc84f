// ABOUTME: Fixed-period background refresh for dashboards (no backoff, no jitter)
// ABOUTME: Ticks immediately, then every period, until stopped or dropped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Handle of a running refresh loop
///
/// Dropping the handle signals the loop to stop, like clearing an interval
/// when a screen unmounts.
#[derive(Debug)]
pub struct Poller {
    name: &'static str,
    shutdown_tx: mpsc::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    /// Run `tick` now and then every `period`
    ///
    /// A tick that outlives the period delays the next one instead of
    /// bunching them up.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        tick().await;
                    }
                    _ = shutdown_rx.recv() => {
                        debug!(poller = name, "Poller received shutdown signal");
                        break;
                    }
                }
            }
        });
        debug!(poller = name, period_ms = period.as_millis() as u64, "Poller started");
        Self {
            name,
            shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Stop the loop and wait for the current tick to finish
    pub async fn stop(mut self) {
        if self.shutdown_tx.send(()).await.is_err() {
            debug!(poller = self.name, "Poller already stopped");
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                debug!(poller = self.name, error = %e, "Poller task ended abnormally");
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if self.handle.is_some() {
            if let Err(e) = self.shutdown_tx.try_send(()) {
                debug!(poller = self.name, error = ?e, "Poller shutdown signal send failed (channel likely closed)");
            }
        }
    }
}
