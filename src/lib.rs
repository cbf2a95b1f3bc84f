// ABOUTME: Main library entry point for the Tawsil admin toolkit
// ABOUTME: Declarative entity modules, authenticated REST transport, dashboards and realtime decoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

#![deny(unsafe_code)]

//! # Tawsil Admin
//!
//! Headless toolkit behind the Tawsil food-delivery admin dashboard. Every
//! admin screen follows the same shape: fetch a list, render it, open a form,
//! submit a REST mutation, refresh. This crate captures that shape once.
//!
//! ## Architecture
//!
//! - **modules**: the generic entity-module framework. A [`ModuleDescriptor`]
//!   declares endpoints and form fields; the form helpers turn entities into
//!   form state and form state into API payloads; the renderer produces a
//!   plain-data view of each control; the [`ModuleManager`] orchestrates
//!   load/create/update/delete for one descriptor.
//! - **registry**: the homepage module definitions and the [`AdminPage`]
//!   composition layer that wires them to one transport and handles 401/403.
//! - **api**: the authenticated fetch contract ([`ApiTransport`]) and its
//!   reqwest implementation.
//! - **dashboard**: cache, monitoring and notification viewers with periodic polling.
//! - **realtime**: decoding of Socket.IO events into toasts.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tawsil_admin::api::HttpApiClient;
//! use tawsil_admin::config::environment::AdminConfig;
//! use tawsil_admin::registry::AdminPage;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AdminConfig::from_env()?;
//!     let transport = Arc::new(HttpApiClient::from_config(&config)?);
//!     let page = AdminPage::new(transport, &config);
//!     page.mount_all().await;
//!     Ok(())
//! }
//! ```
//!
//! [`ModuleDescriptor`]: modules::ModuleDescriptor
//! [`ModuleManager`]: modules::ModuleManager
//! [`AdminPage`]: registry::AdminPage
//! [`ApiTransport`]: api::ApiTransport

/// Authenticated REST transport, token storage and response unwrapping
pub mod api;

/// Environment-driven configuration
pub mod config;

/// Cache, monitoring and notification dashboards with polling
pub mod dashboard;

/// Unified error handling (re-exported from `tawsil-core`)
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Generic entity-module framework: descriptors, form helpers, renderer and manager
pub mod modules;

/// Socket.IO event decoding and toast queue
pub mod realtime;

/// Homepage module registry and page-level composition
pub mod registry;

/// Application constants (re-exported from `tawsil-core`)
pub use tawsil_core::constants;
