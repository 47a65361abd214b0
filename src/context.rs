//! Capabilities the host runtime hands to every helper call.

use crate::client_error::ClientError;
use crate::credentials::ZohoCredentials;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

/// Body of an outbound request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Sent as `application/json`.
    Json(Value),
    /// Sent as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

/// A fully resolved outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> HttpRequest {
        self.headers.push((String::from(name), value.into()));
        self
    }

    pub fn query(mut self, query: Vec<(String, String)>) -> HttpRequest {
        self.query = query;
        self
    }

    pub fn body(mut self, body: RequestBody) -> HttpRequest {
        self.body = body;
        self
    }

    /// Look up a header by case-insensitive name.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body as JSON, or as a JSON string when it isn't JSON at all.
    pub fn json(&self) -> Value {
        if self.body.trim().is_empty() {
            return Value::Null;
        }

        serde_json::from_str(&self.body).unwrap_or_else(|_| Value::String(self.body.clone()))
    }
}

/// Host-provided execution context.
///
/// Every helper call receives one of these explicitly instead of reaching for global state.
/// Implementations dispatch requests as given: non-2xx statuses come back as an
/// `HttpResponse`, only failures to get a response at all are errors.
#[async_trait]
pub trait ExecutionContext: Send + Sync {
    /// Typed credential data stored under `name`.
    async fn credentials(&self, name: &str) -> Result<ZohoCredentials, ClientError>;

    /// Resolve a declared node parameter for the input item at `item_index`.
    fn parameter(&self, name: &str, item_index: usize) -> Option<Value>;

    /// Issue an HTTP request and wait for the full response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}
