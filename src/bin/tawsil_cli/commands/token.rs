// ABOUTME: Token storage commands: set, clear and locate the bearer token file
// ABOUTME: The token file is the one read by the HTTP client on every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use anyhow::{Context, Result};
use tawsil_admin::api::TokenStore;
use tawsil_admin::config::environment::AdminConfig;

fn store(config: &AdminConfig) -> Result<TokenStore> {
    config
        .token_file
        .clone()
        .map(TokenStore::new)
        .context("No token file configured; set TAWSIL_TOKEN_FILE")
}

/// Persist a bearer token
pub async fn set(config: &AdminConfig, token: &str) -> Result<()> {
    let store = store(config)?;
    store.save(token).await?;
    println!("Token saved to {}", store.path().display());
    Ok(())
}

/// Remove the persisted token
pub async fn clear(config: &AdminConfig) -> Result<()> {
    let store = store(config)?;
    store.clear().await?;
    println!("Token removed");
    Ok(())
}

/// Print the token file location
pub fn path(config: &AdminConfig) -> Result<()> {
    println!("{}", store(config)?.path().display());
    Ok(())
}
