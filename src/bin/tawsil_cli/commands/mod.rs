// ABOUTME: Command implementations for the tawsil-admin CLI
// ABOUTME: Shared transport construction and page outcome handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

pub mod cache;
pub mod module;
pub mod monitoring;
pub mod notifications;
pub mod token;

use anyhow::Result;
use std::sync::Arc;
use tawsil_admin::api::{ApiTransport, HttpApiClient};
use tawsil_admin::config::environment::AdminConfig;
use tawsil_admin::errors::{AppError, ErrorCode};
use tawsil_admin::registry::PageOutcome;

/// Authenticated transport for the configured API
pub fn transport(config: &AdminConfig) -> Result<Arc<dyn ApiTransport>> {
    let client = HttpApiClient::from_config(config)?;
    Ok(Arc::new(client))
}

/// Turn a guarded page outcome into a CLI result
///
/// A rejected session becomes an auth error so `main` can exit accordingly.
pub fn into_result<T>(outcome: PageOutcome<T>) -> Result<T> {
    match outcome {
        PageOutcome::Done(value) => Ok(value),
        PageOutcome::Failed(error) => Err(error.into()),
        PageOutcome::RedirectToLogin { message, .. } => {
            Err(AppError::new(ErrorCode::AuthRequired, message).with_status(401).into())
        }
    }
}
