// ABOUTME: Unified error type for every admin operation (network, auth, validation, business rules)
// ABOUTME: Maps backend HTTP statuses onto ErrorCode and carries field-level validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

//! # Unified Error Handling
//!
//! Every network call made by the admin toolkit funnels through one
//! authenticated transport. Whatever goes wrong there, or in the client-side
//! guards in front of it, ends up as an [`AppError`] carrying an [`ErrorCode`],
//! an optional HTTP status, a human-readable message and an optional list of
//! [`FieldError`]s that front ends render beneath the offending control.

/// Normalization of backend JSON error bodies
pub mod body;

pub use body::{normalize_error_body, FieldError};

use crate::constants::messages;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard error codes used throughout the toolkit
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1000-1999)
    /// Missing or expired credentials (401)
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    /// Authenticated but not allowed (403)
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied = 1004,

    // Rate Limiting (2000-2999)
    /// Backend throttled the request (429)
    #[serde(rename = "RATE_LIMIT_EXCEEDED")]
    RateLimitExceeded = 2000,

    // Validation (3000-3999)
    /// Backend or client rejected the input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required field was left empty
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// Wrong data format (e.g. non-image upload)
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 3002,
    /// Value outside accepted bounds (e.g. oversized upload)
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// Resource missing (404)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Conflict (409)
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists = 4001,
    /// A mutation is already in flight for this module
    #[serde(rename = "RESOURCE_LOCKED")]
    ResourceLocked = 4002,
    /// Operation not offered by the module (no endpoint configured)
    #[serde(rename = "OPERATION_UNSUPPORTED")]
    OperationUnsupported = 4003,

    // External Services (5000-5999)
    /// Backend answered with a server error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Backend unreachable, no response received
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,

    // Configuration (6000-6999)
    /// Configuration invalid or missing
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected client-side failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Local storage (token file) failure
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Response body could not be decoded
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput
            | Self::MissingRequiredField
            | Self::InvalidFormat
            | Self::ValueOutOfRange => 400,
            Self::AuthRequired => 401,
            Self::PermissionDenied => 403,
            Self::ResourceNotFound => 404,
            Self::OperationUnsupported => 405,
            Self::ResourceAlreadyExists | Self::ResourceLocked => 409,
            Self::RateLimitExceeded => 429,
            Self::ExternalServiceError => 502,
            Self::ExternalServiceUnavailable => 503,
            Self::ConfigError | Self::InternalError | Self::StorageError | Self::SerializationError => 500,
        }
    }

    /// Map a backend HTTP status onto the closest error code
    #[must_use]
    pub const fn from_http_status(status: u16) -> Self {
        match status {
            401 => Self::AuthRequired,
            403 => Self::PermissionDenied,
            404 => Self::ResourceNotFound,
            409 => Self::ResourceAlreadyExists,
            429 => Self::RateLimitExceeded,
            400..=499 => Self::InvalidInput,
            _ => Self::ExternalServiceError,
        }
    }

    /// Get a developer-facing description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::PermissionDenied => "You do not have permission to perform this action",
            Self::RateLimitExceeded => "Rate limit exceeded",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::InvalidFormat => "The data format is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "The resource conflicts with an existing one",
            Self::ResourceLocked => "Another operation is already in progress",
            Self::OperationUnsupported => "The operation is not available for this module",
            Self::ExternalServiceError => "The API server encountered an error",
            Self::ExternalServiceUnavailable => "The API server could not be reached",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Local storage operation failed",
            Self::SerializationError => "The server response could not be decoded",
        }
    }
}

/// Unified error type for the toolkit
#[derive(Debug, thiserror::Error)]
#[error("{}: {}", .code.description(), .message)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message, suitable for a status banner
    pub message: String,
    /// HTTP status returned by the backend, when a response was received
    pub status: Option<u16>,
    /// Validation errors reported by the backend
    pub field_errors: Vec<FieldError>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            field_errors: Vec::new(),
            source: None,
        }
    }

    /// Attach the HTTP status the backend answered with
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach field-level validation errors
    #[must_use]
    pub fn with_field_errors(mut self, field_errors: Vec<FieldError>) -> Self {
        self.field_errors = field_errors;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status of the failure: the backend's when known, else the code's
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.status.unwrap_or_else(|| self.code.http_status())
    }

    /// 401/403: the session must be re-established
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status, Some(401 | 403))
            || matches!(self.code, ErrorCode::AuthRequired | ErrorCode::PermissionDenied)
    }

    /// No response was received at all
    #[must_use]
    pub fn is_network_error(&self) -> bool {
        self.code == ErrorCode::ExternalServiceUnavailable && self.status.is_none()
    }

    /// Field errors scoped to a named field
    pub fn errors_for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> {
        self.field_errors
            .iter()
            .filter(move |e| e.field.as_deref() == Some(field))
    }

    /// Build an error from a non-2xx response and its (possibly absent) JSON body
    #[must_use]
    pub fn from_response(status: u16, body: Option<&Value>) -> Self {
        let (message, field_errors) = normalize_error_body(status, body);
        Self::new(ErrorCode::from_http_status(status), message)
            .with_status(status)
            .with_field_errors(field_errors)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors for the error taxonomy
impl AppError {
    /// Transport failure: the server could not be reached
    pub fn network(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let error = Self::new(
            ErrorCode::ExternalServiceUnavailable,
            messages::NETWORK_UNREACHABLE,
        );
        if detail.is_empty() {
            error
        } else {
            error.with_source(TransportDetail(detail))
        }
    }

    /// Body was not the JSON the contract promises
    #[must_use]
    pub fn invalid_response() -> Self {
        Self::new(ErrorCode::SerializationError, messages::INVALID_RESPONSE)
    }

    /// Invalid input caught client-side
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Operation not offered by the module descriptor
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::OperationUnsupported, message)
    }

    /// A mutation is already in flight
    #[must_use]
    pub fn operation_in_progress() -> Self {
        Self::new(ErrorCode::ResourceLocked, messages::OPERATION_IN_PROGRESS)
    }

    /// Resource not found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, message)
    }

    /// Upload rejected before or after transfer
    pub fn upload(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Local storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

/// Transport-level detail kept as the error source of network failures
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct TransportDetail(String);

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::invalid_response().with_source(error)
    }
}
