// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses API location, token sources, HTTP timeouts, menu limits and poll intervals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

//! Environment-based configuration

use crate::constants::{intervals, limits};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Default API location for local development
const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Refresh periods for the dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    /// Cache statistics
    pub cache_stats: Duration,
    /// Monitoring overview
    pub monitoring: Duration,
    /// Admin notifications
    pub notifications: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            cache_stats: Duration::from_secs(intervals::CACHE_STATS_SECS),
            monitoring: Duration::from_secs(intervals::MONITORING_SECS),
            notifications: Duration::from_secs(intervals::NOTIFICATIONS_SECS),
        }
    }
}

/// Admin toolkit configuration
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Base URL of the Tawsil REST API
    pub api_url: Url,
    /// Bearer token provided directly (takes precedence over the token file)
    pub admin_token: Option<String>,
    /// File holding the bearer token between runs
    pub token_file: Option<PathBuf>,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Whole-request timeout; `None` leaves requests unbounded
    pub request_timeout: Option<Duration>,
    /// `limit` sent when fetching a restaurant's menu items
    pub menu_items_limit: u32,
    /// Delay before redirecting to login after a 401/403
    pub reauth_delay: Duration,
    /// Dashboard refresh periods
    pub poll: PollIntervals,
    /// Deployment environment
    pub environment: Environment,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            admin_token: None,
            token_file: default_token_file(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: None,
            menu_items_limit: limits::DEFAULT_MENU_ITEMS_LIMIT,
            reauth_delay: Duration::from_millis(intervals::REAUTH_REDIRECT_MS),
            poll: PollIntervals::default(),
            environment: Environment::Development,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `TAWSIL_API_URL`, `TAWSIL_ADMIN_TOKEN`, `TAWSIL_TOKEN_FILE`,
    /// `TAWSIL_CONNECT_TIMEOUT_SECS`, `TAWSIL_REQUEST_TIMEOUT_SECS`,
    /// `TAWSIL_MENU_ITEMS_LIMIT`, `TAWSIL_REAUTH_DELAY_MS`,
    /// `TAWSIL_CACHE_POLL_SECS`, `TAWSIL_MONITORING_POLL_SECS`,
    /// `TAWSIL_NOTIFICATIONS_POLL_SECS` and `ENVIRONMENT`.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let api_url = match env::var("TAWSIL_API_URL") {
            Ok(raw) => Url::parse(raw.trim())
                .with_context(|| format!("Invalid TAWSIL_API_URL: {raw}"))?,
            Err(_) => defaults.api_url,
        };

        let admin_token = env::var("TAWSIL_ADMIN_TOKEN")
            .ok()
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty());

        let token_file = env::var("TAWSIL_TOKEN_FILE")
            .ok()
            .map(PathBuf::from)
            .or(defaults.token_file);

        let connect_timeout = parse_env::<u64>("TAWSIL_CONNECT_TIMEOUT_SECS")?
            .map_or(defaults.connect_timeout, Duration::from_secs);
        let request_timeout = parse_env::<u64>("TAWSIL_REQUEST_TIMEOUT_SECS")?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let menu_items_limit =
            parse_env::<u32>("TAWSIL_MENU_ITEMS_LIMIT")?.unwrap_or(defaults.menu_items_limit);
        let reauth_delay = parse_env::<u64>("TAWSIL_REAUTH_DELAY_MS")?
            .map_or(defaults.reauth_delay, Duration::from_millis);

        let poll = PollIntervals {
            cache_stats: parse_env::<u64>("TAWSIL_CACHE_POLL_SECS")?
                .map_or(defaults.poll.cache_stats, Duration::from_secs),
            monitoring: parse_env::<u64>("TAWSIL_MONITORING_POLL_SECS")?
                .map_or(defaults.poll.monitoring, Duration::from_secs),
            notifications: parse_env::<u64>("TAWSIL_NOTIFICATIONS_POLL_SECS")?
                .map_or(defaults.poll.notifications, Duration::from_secs),
        };

        let environment = env::var("ENVIRONMENT")
            .map(|e| Environment::from_str_or_default(&e))
            .unwrap_or_default();

        if admin_token.is_none() && token_file.is_none() {
            warn!("No admin token source configured; requests will be sent unauthenticated");
        }

        let config = Self {
            api_url,
            admin_token,
            token_file,
            connect_timeout,
            request_timeout,
            menu_items_limit,
            reauth_delay,
            poll,
            environment,
        };
        config.log_summary();
        Ok(config)
    }

    fn log_summary(&self) {
        info!(
            api.url = %self.api_url,
            environment = %self.environment,
            token.inline = self.admin_token.is_some(),
            token.file = ?self.token_file,
            http.request_timeout = ?self.request_timeout,
            "Admin configuration loaded"
        );
    }
}

fn parse_env<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Invalid value for {name}: {raw}")),
        _ => Ok(None),
    }
}

fn default_api_url() -> Url {
    Url::parse(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!("default API URL is valid"))
}

fn default_token_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tawsil-admin").join("token"))
}
