// ABOUTME: Monitoring overview passthrough of server-reported platform statistics
// ABOUTME: The client computes nothing; it only fetches and unwraps the overview document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use super::unwrap_data;
use crate::api::{ApiRequest, ApiTransport};
use crate::constants::endpoints;
use crate::errors::AppResult;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Monitoring endpoint client
#[derive(Clone)]
pub struct MonitoringAdmin {
    transport: Arc<dyn ApiTransport>,
}

impl MonitoringAdmin {
    /// Client over `transport`
    #[must_use]
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Fetch the overview; non-object documents read as empty
    pub async fn overview(&self) -> AppResult<Map<String, Value>> {
        let body = self.transport.request(ApiRequest::get(endpoints::MONITORING)).await?;
        Ok(match unwrap_data(body) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        })
    }
}
