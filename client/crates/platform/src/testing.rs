//! Test Support
//!
//! An in-memory [`HttpTransport`] whose responses come from a handler
//! closure and which records every request it receives. Enabled for this
//! crate's tests and, through the `testing` feature, for dependents.

use std::sync::Mutex;
use std::time::Duration;

use http::StatusCode;

use crate::transport::{ApiRequest, ApiResponse, HttpTransport, TransportError};

type Handler = dyn Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync;

/// Scripted transport for tests
pub struct ScriptedTransport {
    handler: Box<Handler>,
    latency: Option<Duration>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> Result<ApiResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            latency: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep this long (tokio time) before answering each request
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Every request seen so far, in arrival order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Requests seen for `path`
    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests_to(path).len()
    }
}

impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        (self.handler)(request)
    }
}

/// `200 OK` with a JSON body
pub fn ok(body: serde_json::Value) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse::json_body(StatusCode::OK, &body))
}

/// Any status with a JSON body
pub fn status(status: StatusCode, body: serde_json::Value) -> Result<ApiResponse, TransportError> {
    Ok(ApiResponse::json_body(status, &body))
}

/// `401` with the usual token-rejection body
pub fn unauthorized() -> Result<ApiResponse, TransportError> {
    status(
        StatusCode::UNAUTHORIZED,
        serde_json::json!({"detail": "Given token not valid for any token type"}),
    )
}
