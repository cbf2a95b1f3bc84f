// ABOUTME: Integration tests for bearer token persistence
// ABOUTME: Validates save, load, clear and blank-token handling against a temporary directory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use tawsil_admin::api::TokenStore;
use tawsil_admin::errors::ErrorCode;
use tempfile::TempDir;

#[tokio::test]
async fn test_save_load_clear_cycle() {
    let dir = TempDir::new().unwrap();
    let store = TokenStore::new(dir.path().join("nested").join("token"));

    assert_eq!(store.load().await.unwrap(), None);
    store.save("  abc.def.ghi\n").await.unwrap();
    assert_eq!(store.load().await.unwrap().as_deref(), Some("abc.def.ghi"));

    store.clear().await.unwrap();
    assert_eq!(store.load().await.unwrap(), None);
    store.clear().await.unwrap();
}

#[tokio::test]
async fn test_blank_token_is_refused() {
    let dir = TempDir::new().unwrap();
    let store = TokenStore::new(dir.path().join("token"));
    let error = store.save("   ").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_blank_file_reads_as_no_token() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token");
    std::fs::write(&path, "\n\n").unwrap();
    assert_eq!(TokenStore::new(path).load().await.unwrap(), None);
}
