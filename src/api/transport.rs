// ABOUTME: Authenticated fetch contract shared by module managers, dashboards and uploads
// ABOUTME: Defines ApiTransport, request/upload value types and list-shaped response unwrapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use crate::errors::AppResult;
use crate::modules::value::ModuleItem;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// HTTP verbs used by the admin API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    /// Read
    Get,
    /// Create / trigger
    Post,
    /// Replace
    Put,
    /// Partial update
    Patch,
    /// Remove
    Delete,
}

impl ApiMethod {
    /// Upper-case verb as sent on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One JSON request against the admin API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: ApiMethod,
    /// Path relative to the API base URL, query string included
    pub path: String,
    /// JSON body, when the verb carries one
    pub body: Option<Value>,
}

impl ApiRequest {
    /// `GET path`
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: ApiMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    /// `POST path` with a JSON body
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: ApiMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    /// `POST path` without a body
    pub fn post_empty(path: impl Into<String>) -> Self {
        Self {
            method: ApiMethod::Post,
            path: path.into(),
            body: None,
        }
    }

    /// `PUT path` with a JSON body
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: ApiMethod::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    /// `PATCH path` with an optional JSON body
    pub fn patch(path: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method: ApiMethod::Patch,
            path: path.into(),
            body,
        }
    }

    /// `DELETE path`
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: ApiMethod::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// A file selected for upload
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name sent in the multipart part
    pub file_name: String,
    /// MIME type declared for the part
    pub mime_type: String,
    /// Raw content
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl UploadFile {
    /// Build an upload from in-memory bytes
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            crate::errors::AppError::storage(format!("Cannot read {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |n| n.to_string_lossy().into_owned());
        let mime_type = guess_mime(path).to_owned();
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Size in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

fn guess_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Authenticated fetch contract
///
/// Implementations attach the bearer token, send JSON, resolve 204 to
/// `None`, and turn every failure (transport, non-2xx, malformed body) into
/// an `AppError` carrying status, message and field errors.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send one JSON request and return the parsed body (`None` for 204/empty)
    async fn request(&self, request: ApiRequest) -> AppResult<Option<Value>>;

    /// Upload a file as multipart form data (single part named `file`)
    async fn upload(&self, path: &str, file: UploadFile) -> AppResult<Value>;
}

/// Extract an entity list from a response body
///
/// Accepts a raw array, `{data: [...]}` or `{items: [...]}`. Any other
/// shape yields an empty list; non-object entries are skipped.
#[must_use]
pub fn unwrap_list(body: Option<Value>) -> Vec<ModuleItem> {
    let entries = match body {
        Some(Value::Array(entries)) => entries,
        Some(Value::Object(mut map)) => match map.remove("data").or_else(|| map.remove("items")) {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    entries.into_iter().filter_map(ModuleItem::from_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_list_shapes() {
        assert_eq!(unwrap_list(Some(json!([{"id": 1}]))).len(), 1);
        assert_eq!(unwrap_list(Some(json!({"data": [{"id": 1}, {"id": 2}]}))).len(), 2);
        assert_eq!(unwrap_list(Some(json!({"items": [{"id": 1}]}))).len(), 1);
        assert!(unwrap_list(Some(json!({"results": [{"id": 1}]}))).is_empty());
        assert!(unwrap_list(None).is_empty());
    }

    #[test]
    fn test_unwrap_list_skips_non_objects() {
        let items = unwrap_list(Some(json!([{"id": "a"}, 3, "x", null])));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_mime_guess() {
        assert_eq!(guess_mime(Path::new("logo.PNG")), "image/png");
        assert_eq!(guess_mime(Path::new("menu.pdf")), "application/pdf");
        assert_eq!(guess_mime(Path::new("noext")), "application/octet-stream");
    }
}
