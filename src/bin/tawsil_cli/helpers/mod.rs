// ABOUTME: Re-exports helper modules for tawsil-admin
// ABOUTME: Provides access to terminal display formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

pub mod display;
