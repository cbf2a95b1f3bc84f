// ABOUTME: Configuration management module for the admin toolkit
// ABOUTME: Environment-driven settings for the API endpoint, token storage, timeouts and polling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

//! Configuration module
//!
//! All configuration comes from environment variables; there is no config
//! file. See [`environment::AdminConfig::from_env`] for the variables read.

/// Environment and runtime configuration
pub mod environment;

pub use environment::{AdminConfig, Environment, PollIntervals};
