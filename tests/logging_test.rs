// ABOUTME: Unit tests for logging configuration
// ABOUTME: Validates environment parsing, CLI presets and single global initialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use tawsil_admin::logging::{AppLogger, LogFormat, LoggingConfig, SERVICE_NAME};

#[test]
#[serial]
fn test_from_env_reads_format_and_environment() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    let config = LoggingConfig::from_env();
    env::remove_var("LOG_FORMAT");
    env::remove_var("ENVIRONMENT");

    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert_eq!(config.environment, "production");
}

#[test]
#[serial]
fn test_cli_preset() {
    env::remove_var("SERVICE_NAME");
    let quiet = LoggingConfig::for_cli(false);
    let verbose = LoggingConfig::for_cli(true);

    assert_eq!(quiet.level, "warn");
    assert_eq!(verbose.level, "debug");
    assert_eq!(quiet.format, LogFormat::Compact);
    assert_eq!(quiet.service_name, SERVICE_NAME);
}

#[test]
#[serial]
fn test_second_init_fails() {
    let config = LoggingConfig::for_cli(false);
    let first = config.init();
    let second = config.init();

    assert!(first.is_ok());
    assert!(second.is_err());
    AppLogger::log_module_operation("categories", "load", true, "");
    AppLogger::log_api_request("GET", "/admin/promotions", 200, 12);
}
