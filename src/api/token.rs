// ABOUTME: Bearer token persistence standing in for the browser's client-side storage
// ABOUTME: Reads, writes and clears a single token file; cleared on 401/403 before re-login
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use crate::errors::{AppError, AppResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Token file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the token file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token; a missing or blank file yields `None`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file exists but cannot be read
    pub async fn load(&self) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_owned()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!(
                "Cannot read token file {}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Persist a token, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be written
    pub async fn save(&self, token: &str) -> AppResult<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::invalid_input("Token cannot be empty"));
        }
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::storage(format!("Cannot create {}: {e}", parent.display()))
            })?;
        }
        tokio::fs::write(&self.path, token).await.map_err(|e| {
            AppError::storage(format!("Cannot write token file {}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), "Admin token stored");
        Ok(())
    }

    /// Remove the stored token; clearing an absent token is not an error
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file exists but cannot be removed
    pub async fn clear(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Admin token cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!(
                "Cannot remove token file {}: {e}",
                self.path.display()
            ))),
        }
    }
}
