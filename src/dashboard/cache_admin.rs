// ABOUTME: Viewer and controls for the server-side cache (stats, flush, pattern invalidation)
// ABOUTME: Thin client over /admin/cache endpoints; all numbers are server-reported
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use super::unwrap_data;
use crate::api::{ApiRequest, ApiTransport};
use crate::constants::{endpoints, messages};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

/// Server-reported cache statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Cache hits
    #[serde(default)]
    pub hits: Option<u64>,
    /// Cache misses
    #[serde(default)]
    pub misses: Option<u64>,
    /// Stored keys
    #[serde(default, alias = "total_keys", alias = "size")]
    pub keys: Option<u64>,
    /// Backend-specific extras (memory usage, uptime, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CacheStats {
    /// Hit ratio in `[0, 1]`, when both counters are reported and non-zero
    #[must_use]
    pub fn hit_rate(&self) -> Option<f64> {
        let hits = self.hits?;
        let total = hits + self.misses?;
        (total > 0).then(|| hits as f64 / total as f64)
    }
}

/// Cache administration endpoints
#[derive(Clone)]
pub struct CacheAdmin {
    transport: Arc<dyn ApiTransport>,
}

impl CacheAdmin {
    /// Client over `transport`
    #[must_use]
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Fetch current statistics; an empty body reads as no statistics
    pub async fn stats(&self) -> AppResult<CacheStats> {
        let body = self.transport.request(ApiRequest::get(endpoints::CACHE_STATS)).await?;
        match unwrap_data(body) {
            None => Ok(CacheStats::default()),
            Some(value) => serde_json::from_value(value).map_err(AppError::from),
        }
    }

    /// Flush every entry; returns the server's message, if any
    pub async fn clear(&self) -> AppResult<Option<String>> {
        let body = self
            .transport
            .request(ApiRequest::post_empty(endpoints::CACHE_CLEAR))
            .await?;
        info!("Server cache cleared");
        Ok(server_message(body.as_ref()))
    }

    /// Invalidate entries matching `pattern`; blank patterns are refused locally
    pub async fn invalidate(&self, pattern: &str) -> AppResult<Option<String>> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(AppError::invalid_input(messages::EMPTY_PATTERN));
        }
        let path = format!("{}/{}", endpoints::CACHE_INVALIDATE, urlencoding::encode(pattern));
        let body = self.transport.request(ApiRequest::post_empty(path)).await?;
        info!(pattern = %pattern, "Server cache entries invalidated");
        Ok(server_message(body.as_ref()))
    }
}

fn server_message(body: Option<&Value>) -> Option<String> {
    body?.get("message")?.as_str().map(str::to_owned)
}
