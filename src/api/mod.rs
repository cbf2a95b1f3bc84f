// ABOUTME: Authenticated REST access for the admin toolkit
// ABOUTME: Transport trait (injection seam), reqwest client, token storage and list unwrapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

//! # API access
//!
//! Every network call goes through an [`ApiTransport`]. The production
//! implementation is [`HttpApiClient`]; tests inject a recording double.

/// Reqwest-backed transport with bearer authentication
pub mod client;
/// Bearer token persistence (client-side storage)
pub mod token;
/// Transport trait, request types and response helpers
pub mod transport;

pub use client::{interpret_response, HttpApiClient};
pub use token::TokenStore;
pub use transport::{unwrap_list, ApiMethod, ApiRequest, ApiTransport, UploadFile};
