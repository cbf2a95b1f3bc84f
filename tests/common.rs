// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Provides a recording mock transport with queued, gated and failing replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Tawsil
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `tawsil_admin`
//!
//! [`MockTransport`] stands in for the HTTP client: it records every request
//! and answers from per-route reply queues.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use tawsil_admin::api::{ApiMethod, ApiRequest, ApiTransport, UploadFile};
use tawsil_admin::config::environment::AdminConfig;
use tawsil_admin::errors::{AppError, AppResult};
use tokio::sync::Notify;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// A canned answer for one request
#[derive(Debug, Clone)]
pub enum Reply {
    /// 2xx with a JSON body
    Json(Value),
    /// 204 No Content
    Empty,
    /// Non-2xx with an optional JSON body
    Status(u16, Option<Value>),
    /// Server unreachable
    Network,
}

impl Reply {
    fn into_result(self) -> AppResult<Option<Value>> {
        match self {
            Self::Json(body) => Ok(Some(body)),
            Self::Empty => Ok(None),
            Self::Status(status, body) => Err(AppError::from_response(status, body.as_ref())),
            Self::Network => Err(AppError::network("connection refused")),
        }
    }
}

type Route = (ApiMethod, String);

/// Recording transport answering from per-route queues
///
/// The last queued reply of a route is repeated once the queue drains.
/// Unconfigured GETs answer `[]`, other verbs answer 204.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    replies: Mutex<HashMap<Route, VecDeque<Reply>>>,
    gates: Mutex<HashMap<Route, Arc<Notify>>>,
    sequenced_gates: Mutex<HashMap<Route, VecDeque<Arc<Notify>>>>,
    uploads: Mutex<Vec<UploadFile>>,
    upload_reply: Mutex<Option<Reply>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply for `method path`
    pub fn reply(&self, method: ApiMethod, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(reply);
    }

    /// Queue a JSON reply for `GET path`
    pub fn get_json(&self, path: &str, body: Value) {
        self.reply(ApiMethod::Get, path, Reply::Json(body));
    }

    /// Hold replies of `method path` until the returned handle is notified
    ///
    /// The request is recorded before it blocks.
    pub fn gate(&self, method: ApiMethod, path: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert((method, path.to_owned()), Arc::clone(&notify));
        notify
    }

    /// Hold the next `count` requests of `method path`, one handle per request
    ///
    /// The n-th request waits on the n-th handle; its reply is taken from the
    /// queue before it blocks, so replies follow request order.
    pub fn gate_each(&self, method: ApiMethod, path: &str, count: usize) -> Vec<Arc<Notify>> {
        let handles: Vec<Arc<Notify>> = (0..count).map(|_| Arc::new(Notify::new())).collect();
        self.sequenced_gates
            .lock()
            .unwrap()
            .entry((method, path.to_owned()))
            .or_default()
            .extend(handles.iter().cloned());
        handles
    }

    /// Answer uploads with `reply` instead of a generated URL
    pub fn upload_reply(&self, reply: Reply) {
        *self.upload_reply.lock().unwrap() = Some(reply);
    }

    /// Every request seen so far
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests matching `method path`
    pub fn requests_to(&self, method: ApiMethod, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Number of requests matching `method path`
    pub fn count(&self, method: ApiMethod, path: &str) -> usize {
        self.requests_to(method, path).len()
    }

    /// Number of requests that were not GETs
    pub fn mutation_count(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method != ApiMethod::Get)
            .count()
    }

    /// Files received by `upload`
    pub fn uploads(&self) -> Vec<UploadFile> {
        self.uploads.lock().unwrap().clone()
    }

    fn next_reply(&self, route: &Route) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(route) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ if route.0 == ApiMethod::Get => Reply::Json(json!([])),
            _ => Reply::Empty,
        }
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn request(&self, request: ApiRequest) -> AppResult<Option<Value>> {
        let route = (request.method, request.path.clone());
        self.requests.lock().unwrap().push(request);
        let reply = self.next_reply(&route);

        let sequenced = self
            .sequenced_gates
            .lock()
            .unwrap()
            .get_mut(&route)
            .and_then(VecDeque::pop_front);
        let gate = sequenced.or_else(|| self.gates.lock().unwrap().get(&route).cloned());
        if let Some(gate) = gate {
            gate.notified().await;
        }
        reply.into_result()
    }

    async fn upload(&self, _path: &str, file: UploadFile) -> AppResult<Value> {
        let url = format!("https://cdn.tawsil.test/{}", file.file_name);
        self.uploads.lock().unwrap().push(file);
        let reply = self.upload_reply.lock().unwrap().clone();
        match reply {
            Some(reply) => reply.into_result().map(|body| body.unwrap_or(Value::Null)),
            None => Ok(json!({ "url": url })),
        }
    }
}

/// Transport as the trait object managers expect
pub fn as_transport(mock: &Arc<MockTransport>) -> Arc<dyn ApiTransport> {
    Arc::clone(mock) as Arc<dyn ApiTransport>
}

/// Configuration without token file and with a short re-login delay
pub fn test_config() -> AdminConfig {
    AdminConfig {
        token_file: None,
        reauth_delay: Duration::from_millis(5),
        ..AdminConfig::default()
    }
}

/// `GET` path of a restaurant's menu with the default limit
pub fn menu_path(restaurant_id: &str) -> String {
    format!("/menuitem/getall?restaurant_id={restaurant_id}&limit=500")
}

/// Wait until `condition` holds, polling briefly
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}
