//! HTTP Transport
//!
//! The outbound side of the client: a request/response model that is
//! independent of any HTTP library, the [`HttpTransport`] port, and the
//! reqwest-backed adapter used in production.

use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header};
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;

// ============================================================================
// Request / Response model
// ============================================================================

/// How an outbound request is credentialed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialMode {
    /// Attach the current access token (if any) and allow token refresh
    #[default]
    Bearer,
    /// Public endpoint: never attach a token, never refresh
    Omit,
}

/// An outbound API request
///
/// `path` is relative to the configured API base URL (e.g. `"cities/"`).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
    pub credentials: CredentialMode,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: HeaderMap::new(),
            credentials: CredentialMode::Bearer,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Mark the request as public (no bearer token, no refresh cycle)
    pub fn public(mut self) -> Self {
        self.credentials = CredentialMode::Omit;
        self
    }

    /// Set `Authorization: Bearer <token>`, replacing any previous value
    pub fn set_bearer(&mut self, bearer: &str) -> Result<(), TransportError> {
        let value = HeaderValue::from_str(bearer)
            .map_err(|_| TransportError::InvalidHeader(header::AUTHORIZATION.to_string()))?;
        self.headers.insert(header::AUTHORIZATION, value);
        Ok(())
    }

    /// Drop any `Authorization` header
    pub fn clear_bearer(&mut self) {
        self.headers.remove(header::AUTHORIZATION);
    }

    /// Current `Authorization` header value, if any
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Insert an arbitrary header
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A response received from the API (any status)
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Build a response with a JSON body
    pub fn json_body(status: StatusCode, body: &serde_json::Value) -> Self {
        let mut response = Self::new(status, body.to_string().into_bytes());
        response.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        response
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Body as (lossy) text, for logging and error messages
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failure to obtain any response from the API
///
/// A non-2xx status is not a transport error; it is a response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header value for {0}")]
    InvalidHeader(String),

    #[error("Request failed: {0}")]
    Request(String),
}

impl TransportError {
    pub fn kind(&self) -> kernel::error::kind::ErrorKind {
        use kernel::error::kind::ErrorKind;
        match self {
            TransportError::Timeout => ErrorKind::Timeout,
            TransportError::InvalidUrl(_) => ErrorKind::Configuration,
            TransportError::Connect(_)
            | TransportError::InvalidHeader(_)
            | TransportError::Request(_) => ErrorKind::Network,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_builder() {
            TransportError::InvalidUrl(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

// ============================================================================
// Port
// ============================================================================

/// Trait for HTTP backends
#[trait_variant::make(HttpTransport: Send)]
pub trait LocalHttpTransport {
    /// Send a request and return whatever response the server produced
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

// ============================================================================
// reqwest adapter
// ============================================================================

/// reqwest-backed transport bound to one API base URL
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: Url,
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport for `base_url` with the given request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base_url =
            Url::parse(base_url).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidUrl(e.to_string()))
    }
}

impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request.path)?;

        let mut builder = self
            .http_client
            .request(request.method.clone(), url)
            .headers(request.headers.clone());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        tracing::trace!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            "HTTP exchange completed"
        );

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}


#[cfg(test)]
mod reqwest_tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn transport_for(server: &Server) -> ReqwestTransport {
        ReqwestTransport::new(&format!("{}/api/", server.url()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_get_sends_query_and_bearer() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/weather-data/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("city".into(), "7".into()),
                Matcher::UrlEncoded("search".into(), "New Delhi".into()),
            ]))
            .match_header("authorization", "Bearer tok1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":1}]"#)
            .create_async()
            .await;

        let mut request = ApiRequest::get("weather-data/")
            .query("city", 7)
            .query("search", "New Delhi");
        request.set_bearer("Bearer tok1").unwrap();

        let response = HttpTransport::execute(&transport_for(&server), &request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let items: serde_json::Value = response.json().unwrap();
        assert_eq!(items, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn test_post_sends_json_body_without_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/token/")
            .match_header("content-type", "application/json")
            .match_header("authorization", Matcher::Missing)
            .match_body(Matcher::Json(json!({"username": "alice", "password": "hunter22"})))
            .with_status(200)
            .with_body(r#"{"access":"tok1","refresh":"refresh-1"}"#)
            .create_async()
            .await;

        let request = ApiRequest::post("token/")
            .json(&json!({"username": "alice", "password": "hunter22"}))
            .unwrap()
            .public();

        let response = HttpTransport::execute(&transport_for(&server), &request).await.unwrap();

        mock.assert_async().await;
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_error_status_is_a_response() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/thresholds/3/")
            .with_status(400)
            .with_body(r#"{"consecutive_updates":["Ensure this value is greater than or equal to 1."]}"#)
            .create_async()
            .await;

        let request = ApiRequest::put("thresholds/3/")
            .json(&json!({"consecutive_updates": 0}))
            .unwrap();
        let response = HttpTransport::execute(&transport_for(&server), &request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(response.text().contains("greater than or equal to 1"));
    }

    #[tokio::test]
    async fn test_unauthorized_passes_through() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/api/city/delete/4/")
            .with_status(401)
            .with_body(r#"{"detail":"Given token not valid for any token type"}"#)
            .create_async()
            .await;

        let response = HttpTransport::execute(&transport_for(&server), &ApiRequest::delete("city/delete/4/"))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refused_connection_maps_to_connect() {
        // Bind then release a port so nothing is listening on it
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let transport =
            ReqwestTransport::new(&format!("http://127.0.0.1:{port}/"), Duration::from_secs(5))
                .unwrap();

        let result = HttpTransport::execute(&transport, &ApiRequest::get("cities/")).await;

        assert!(matches!(result, Err(TransportError::Connect(_))), "{result:?}");
    }

    #[tokio::test]
    async fn test_silent_server_maps_to_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let accept = tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });

        let transport =
            ReqwestTransport::new(&format!("http://{addr}/"), Duration::from_millis(200)).unwrap();
        let result = HttpTransport::execute(&transport, &ApiRequest::get("cities/")).await;

        assert!(matches!(result, Err(TransportError::Timeout)), "{result:?}");
        accept.abort();
    }
}
