//! HTTP transport for the tenant-scoped network API
//!
//! Every call opens its own connection; nothing is pooled or retried.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::config::TransportConfig;
use crate::path::{resource_path, CONTENT_TYPE};
use crate::{Result, TransportError};

/// Statuses treated as success: 200, 201, 202 and 204
pub const SUCCESS_STATUSES: [u16; 4] = [200, 201, 202, 204];

/// Tenant-scoped API request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub tenant: String,
    pub method: Method,
    pub action: String,
    pub body: Option<Value>,
    pub headers: HashMap<String, String>,
    pub query_params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(tenant: impl Into<String>, method: Method, action: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            method,
            action: action.into(),
            body: None,
            headers: HashMap::new(),
            query_params: Vec::new(),
        }
    }

    pub fn get(tenant: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new(tenant, Method::GET, action)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `payload` as the JSON request body.
    pub fn with_json<T: Serialize>(self, payload: &T) -> Result<Self> {
        let body = serde_json::to_value(payload)
            .map_err(|e| TransportError::InvalidRequest(format!("body serialization: {}", e)))?;
        Ok(self.with_body(body))
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    /// Full resource path including tenant prefix and query string
    pub fn path(&self) -> String {
        resource_path(&self.tenant, &self.action, &self.query_params)
    }
}

/// Successful API response; the body is left undecoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        SUCCESS_STATUSES.contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> std::result::Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Split a raw status/body pair into success or `TransportError::Status`.
fn classify(status: u16, body: String) -> Result<ApiResponse> {
    let response = ApiResponse::new(status, body);
    if response.is_success() {
        Ok(response)
    } else {
        Err(TransportError::Status {
            status: response.status,
            body: response.body,
        })
    }
}

/// Trait for API communication
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self> {
        let mut builder = Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("HTTP client setup: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.config.base_url(), request.path())
    }

    fn connection_error(&self, error: reqwest::Error) -> TransportError {
        TransportError::Connection {
            target: format!("{}:{}", self.config.host, self.config.port),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(request);
        log::debug!("Sending request: {} {}", request.method, url);

        let mut req_builder = self.client.request(request.method.clone(), &url);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(ref body) = request.body {
            req_builder = req_builder
                .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
                .body(body.to_string());
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.connection_error(e))?;

        log::debug!("Response: status={}, body_size={}", status, body.len());
        classify(status, body)
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Response { status: u16, body: String },
    ConnectionFailure(String),
}

/// Mock transport for testing
///
/// Replies are keyed by `"METHOD /full/path"`; every request is recorded.
#[derive(Default)]
pub struct MockTransport {
    replies: HashMap<String, MockReply>,
    recorded: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(method: &Method, path: &str) -> String {
        format!("{} {}", method, path)
    }

    pub fn add_response(&mut self, method: Method, path: &str, status: u16, body: &str) {
        self.replies.insert(
            Self::make_key(&method, path),
            MockReply::Response {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn with_response(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.add_response(method, path, status, body);
        self
    }

    pub fn with_connection_failure(mut self, method: Method, path: &str, message: &str) -> Self {
        self.replies.insert(
            Self::make_key(&method, path),
            MockReply::ConnectionFailure(message.to_string()),
        );
        self
    }

    /// Requests seen so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.recorded
            .lock()
            .map(|recorded| recorded.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let path = request.path();
        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.push(request.clone());
        }

        match self.replies.get(&Self::make_key(&request.method, &path)) {
            Some(MockReply::Response { status, body }) => classify(*status, body.clone()),
            Some(MockReply::ConnectionFailure(message)) => Err(TransportError::Connection {
                target: "mock".to_string(),
                message: message.clone(),
            }),
            None => Err(TransportError::Status {
                status: 404,
                body: format!("Mock response not found for: {} {}", request.method, path),
            }),
        }
    }
}
