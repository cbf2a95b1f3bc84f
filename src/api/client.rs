// ABOUTME: Reqwest-backed authenticated transport for the Tawsil admin API
// ABOUTME: Attaches the bearer token, sends JSON, maps 204/non-JSON/non-2xx onto AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil

use super::token::TokenStore;
use super::transport::{ApiMethod, ApiRequest, ApiTransport, UploadFile};
use crate::config::environment::AdminConfig;
use crate::constants::messages;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

/// Authenticated JSON client for the admin API
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http_client: Client,
    base_url: String,
    token: Option<String>,
    token_store: Option<TokenStore>,
}

impl HttpApiClient {
    /// Create a client for `base_url` with an optional inline token and token file
    #[must_use]
    pub fn new(http_client: Client, base_url: &Url, token: Option<String>, token_store: Option<TokenStore>) -> Self {
        Self {
            http_client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            token,
            token_store,
        }
    }

    /// Build the client from configuration (connect timeout, optional request timeout)
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn from_config(config: &AdminConfig) -> AppResult<Self> {
        let mut builder = ClientBuilder::new().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| AppError::config(format!("Cannot build HTTP client: {e}")))?;
        Ok(Self::new(
            http_client,
            &config.api_url,
            config.admin_token.clone(),
            config.token_file.clone().map(TokenStore::new),
        ))
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn bearer_token(&self) -> Option<String> {
        if let Some(token) = &self.token {
            return Some(token.clone());
        }
        match &self.token_store {
            Some(store) => store.load().await.unwrap_or_else(|e| {
                warn!(error = %e, "Token storage unreadable, sending request without token");
                None
            }),
            None => None,
        }
    }

    async fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http_client
            .request(method, self.url_for(path))
            .header(ACCEPT, "application/json");
        match self.bearer_token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, method: ApiMethod, path: &str, builder: RequestBuilder) -> AppResult<Option<Value>> {
        let started = Instant::now();
        debug!(http.method = %method, http.path = %path, "Sending API request");

        let response = builder.send().await.map_err(|e| {
            warn!(http.method = %method, http.path = %path, error = %e, "API server unreachable");
            AppError::network(e.to_string())
        })?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;

        AppLogger::log_api_request(
            method.as_str(),
            path,
            status,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        interpret_response(status, &bytes)
    }
}

const fn to_reqwest_method(method: ApiMethod) -> Method {
    match method {
        ApiMethod::Get => Method::GET,
        ApiMethod::Post => Method::POST,
        ApiMethod::Put => Method::PUT,
        ApiMethod::Patch => Method::PATCH,
        ApiMethod::Delete => Method::DELETE,
    }
}

/// Interpret a raw HTTP response according to the fetch contract
///
/// - 204 or an empty 2xx body resolves to `None`
/// - a 2xx body that is not JSON is an invalid-response error
/// - non-2xx statuses become `AppError::from_response`, using the JSON body
///   when it parses and status defaults otherwise, so 401/403 keep their status
///
/// # Errors
///
/// Returns the normalized error for non-2xx statuses and malformed bodies
pub fn interpret_response(status: u16, bytes: &[u8]) -> AppResult<Option<Value>> {
    if status == 204 {
        return Ok(None);
    }
    let parsed = if bytes.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        Some(serde_json::from_slice::<Value>(bytes))
    };

    if (200..300).contains(&status) {
        return match parsed {
            None => Ok(None),
            Some(Ok(body)) => Ok(Some(body)),
            Some(Err(e)) => Err(AppError::invalid_response().with_source(e)),
        };
    }

    let body = parsed.and_then(Result::ok);
    Err(AppError::from_response(status, body.as_ref()))
}

#[async_trait]
impl ApiTransport for HttpApiClient {
    async fn request(&self, request: ApiRequest) -> AppResult<Option<Value>> {
        let mut builder = self
            .authorized(to_reqwest_method(request.method), &request.path)
            .await;
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        self.execute(request.method, &request.path, builder).await
    }

    async fn upload(&self, path: &str, file: UploadFile) -> AppResult<Value> {
        let size = file.size();
        let file_name = file.file_name.clone();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|_| AppError::upload(ErrorCode::InvalidFormat, messages::UPLOAD_NOT_IMAGE))?;
        let builder = self
            .authorized(Method::POST, path)
            .await
            .multipart(Form::new().part("file", part));

        let result = self.execute(ApiMethod::Post, path, builder).await;
        AppLogger::log_upload(&file_name, size, result.is_ok());
        result?.ok_or_else(|| AppError::upload(ErrorCode::ExternalServiceError, messages::UPLOAD_NO_URL))
    }
}
