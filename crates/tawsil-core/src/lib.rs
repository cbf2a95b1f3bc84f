// ABOUTME: Core types and constants for the Tawsil admin toolkit
// ABOUTME: Foundation crate with the error taxonomy, backend error normalization and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

#![deny(unsafe_code)]

//! # Tawsil Core
//!
//! Foundation crate shared by the admin module framework, the dashboards and
//! the `tawsil-admin` CLI. It changes rarely, so it lives in its own crate.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, field-level validation errors and
//!   normalization of backend error bodies
//! - **constants**: REST paths, limits and user-facing messages

/// Unified error handling with HTTP status mapping and field-level validation errors
pub mod errors;

/// Application constants organized by domain
pub mod constants;
