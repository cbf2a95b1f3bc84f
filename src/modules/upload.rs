// ABOUTME: Image field upload flow: client-side validation, multipart upload and preview tracking
// ABOUTME: Errors stay on the image field and never reach the module-level status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use crate::api::{ApiTransport, UploadFile};
use crate::constants::{endpoints, limits, messages};
use crate::errors::{AppError, AppResult, ErrorCode};
use serde::Serialize;
use tracing::{debug, warn};

/// Per image field upload state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageFieldState {
    /// Local preview (file name standing in for the browser object URL)
    pub preview: Option<String>,
    /// URL returned by the last successful upload
    pub uploaded_url: Option<String>,
    /// Upload in flight
    pub uploading: bool,
    /// Inline error of the last attempt
    pub error: Option<String>,
}

impl ImageFieldState {
    /// Preview to show for the current form value
    ///
    /// The local preview only applies while the field still holds the URL it
    /// produced; once the value changes externally the preview is dropped.
    #[must_use]
    pub fn preview_for(&self, current_value: &str) -> Option<&str> {
        match (&self.preview, &self.uploaded_url) {
            (Some(preview), Some(url)) if url == current_value => Some(preview.as_str()),
            _ => None,
        }
    }

    /// Mark an upload as started
    pub fn begin(&mut self) {
        self.uploading = true;
        self.error = None;
    }

    /// Record a successful upload
    pub fn succeed(&mut self, preview: String, url: String) {
        self.uploading = false;
        self.preview = Some(preview);
        self.uploaded_url = Some(url);
        self.error = None;
    }

    /// Record a failed upload
    pub fn fail(&mut self, message: String) {
        self.uploading = false;
        self.error = Some(message);
    }

    /// Forget the preview and upload (explicit removal)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Reject non-images and files over the size limit before any network call
pub fn validate_image(file: &UploadFile) -> AppResult<()> {
    if !file.mime_type.starts_with(limits::IMAGE_MIME_PREFIX) {
        return Err(AppError::upload(ErrorCode::InvalidFormat, messages::UPLOAD_NOT_IMAGE));
    }
    if file.size() > limits::MAX_IMAGE_BYTES {
        return Err(AppError::upload(ErrorCode::ValueOutOfRange, messages::UPLOAD_TOO_LARGE));
    }
    Ok(())
}

/// Validate and upload an image, returning the stored URL
///
/// The response must carry a non-empty `url` string.
pub async fn upload_image(transport: &dyn ApiTransport, file: UploadFile) -> AppResult<String> {
    validate_image(&file)?;
    debug!(file = %file.file_name, size = file.size(), "Uploading image");

    let response = transport.upload(endpoints::UPLOAD, file).await?;
    match response.get("url").and_then(serde_json::Value::as_str) {
        Some(url) if !url.trim().is_empty() => Ok(url.to_owned()),
        _ => {
            warn!("Upload response carried no url");
            Err(AppError::upload(ErrorCode::ExternalServiceError, messages::UPLOAD_NO_URL))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_image() {
        let file = UploadFile::new("menu.pdf", "application/pdf", vec![0; 10]);
        let err = validate_image(&file).err().map(|e| e.code);
        assert_eq!(err, Some(ErrorCode::InvalidFormat));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let at_limit = UploadFile::new("a.png", "image/png", vec![0; limits::MAX_IMAGE_BYTES as usize]);
        assert!(validate_image(&at_limit).is_ok());
        let over = UploadFile::new("a.png", "image/png", vec![0; limits::MAX_IMAGE_BYTES as usize + 1]);
        assert_eq!(validate_image(&over).err().map(|e| e.code), Some(ErrorCode::ValueOutOfRange));
    }

    #[test]
    fn test_preview_dropped_after_external_change() {
        let mut state = ImageFieldState::default();
        state.succeed("logo.png".into(), "https://cdn/x.png".into());
        assert_eq!(state.preview_for("https://cdn/x.png"), Some("logo.png"));
        assert_eq!(state.preview_for("https://cdn/other.png"), None);
    }
}
