// ABOUTME: Unified error handling re-exported from tawsil-core
// ABOUTME: Keeps `crate::errors::AppError` paths stable for the library and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

pub use tawsil_core::errors::*;
