// ABOUTME: Unit tests for environment-driven admin configuration
// ABOUTME: Validates defaults, overrides and rejection of unparsable values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tawsil_admin::config::environment::{AdminConfig, Environment};

const VARS: &[&str] = &[
    "TAWSIL_API_URL",
    "TAWSIL_ADMIN_TOKEN",
    "TAWSIL_TOKEN_FILE",
    "TAWSIL_CONNECT_TIMEOUT_SECS",
    "TAWSIL_REQUEST_TIMEOUT_SECS",
    "TAWSIL_MENU_ITEMS_LIMIT",
    "TAWSIL_REAUTH_DELAY_MS",
    "TAWSIL_CACHE_POLL_SECS",
    "TAWSIL_MONITORING_POLL_SECS",
    "TAWSIL_NOTIFICATIONS_POLL_SECS",
    "ENVIRONMENT",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = AdminConfig::from_env().unwrap();

    assert_eq!(config.api_url.as_str(), "http://localhost:3000/");
    assert_eq!(config.admin_token, None);
    assert_eq!(config.connect_timeout, Duration::from_secs(10));
    assert_eq!(config.request_timeout, None);
    assert_eq!(config.menu_items_limit, 500);
    assert_eq!(config.reauth_delay, Duration::from_millis(1500));
    assert_eq!(config.environment, Environment::Development);
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var("TAWSIL_API_URL", "https://api.tawsil.dz");
    env::set_var("TAWSIL_ADMIN_TOKEN", "  tok  ");
    env::set_var("TAWSIL_TOKEN_FILE", "/tmp/tawsil/token");
    env::set_var("TAWSIL_REQUEST_TIMEOUT_SECS", "30");
    env::set_var("TAWSIL_MENU_ITEMS_LIMIT", "200");
    env::set_var("TAWSIL_REAUTH_DELAY_MS", "0");
    env::set_var("TAWSIL_NOTIFICATIONS_POLL_SECS", "5");
    env::set_var("ENVIRONMENT", "production");

    let config = AdminConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.api_url.host_str(), Some("api.tawsil.dz"));
    assert_eq!(config.admin_token.as_deref(), Some("tok"));
    assert_eq!(config.token_file, Some(PathBuf::from("/tmp/tawsil/token")));
    assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    assert_eq!(config.menu_items_limit, 200);
    assert_eq!(config.reauth_delay, Duration::ZERO);
    assert_eq!(config.poll.notifications, Duration::from_secs(5));
    assert_eq!(config.poll.cache_stats, Duration::from_secs(10));
    assert!(config.environment.is_production());
}

#[test]
#[serial]
fn test_zero_request_timeout_means_unbounded() {
    clear_env();
    env::set_var("TAWSIL_REQUEST_TIMEOUT_SECS", "0");
    let config = AdminConfig::from_env().unwrap();
    clear_env();
    assert_eq!(config.request_timeout, None);
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_env();
    env::set_var("TAWSIL_MENU_ITEMS_LIMIT", "beaucoup");
    let error = AdminConfig::from_env().unwrap_err();
    clear_env();
    assert!(error.to_string().contains("TAWSIL_MENU_ITEMS_LIMIT"));

    env::set_var("TAWSIL_API_URL", "not a url");
    assert!(AdminConfig::from_env().is_err());
    clear_env();
}
