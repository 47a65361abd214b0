//! Stand-alone execution context backed by `reqwest`.

use crate::client_error::ClientError;
use crate::context::{ExecutionContext, HttpRequest, HttpResponse, RequestBody};
use crate::credentials::{OAuthTokenData, ZohoCredentials, CREDENTIAL_NAME};
use crate::token_record::AccessToken;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use std::time::Duration;

/// Default network timeout for API requests, in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Runs helper calls outside a workflow host: one credential, a list of input items, and a
/// shared HTTP connection pool.
pub struct HttpContext {
    http: reqwest::Client,
    credentials: ZohoCredentials,
    items: Vec<Map<String, Value>>,
    timeout: u64,
}

impl HttpContext {
    pub fn new(credentials: ZohoCredentials) -> Result<HttpContext, ClientError> {
        HttpContext::with_timeout(credentials, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        credentials: ZohoCredentials,
        timeout: u64,
    ) -> Result<HttpContext, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(HttpContext {
            http,
            credentials,
            items: Vec::new(),
            timeout,
        })
    }

    /// Node parameters, one map per input item.
    pub fn with_items(mut self, items: Vec<Map<String, Value>>) -> HttpContext {
        self.items = items;
        self
    }

    /// Get the timeout for API requests.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn stored_credentials(&self) -> &ZohoCredentials {
        &self.credentials
    }

    /// Keep a refreshed token for later calls, as a host's credential store would.
    pub fn store_token(&mut self, token: &AccessToken) {
        self.credentials.oauth_token_data = Some(OAuthTokenData {
            api_domain: token.api_domain.clone(),
            access_token: token.access_token.clone(),
            refresh_token: token.refresh_token.clone(),
            expires_in: token.expires_in,
        });
    }
}

#[async_trait]
impl ExecutionContext for HttpContext {
    async fn credentials(&self, name: &str) -> Result<ZohoCredentials, ClientError> {
        if name != CREDENTIAL_NAME {
            return Err(ClientError::Configuration(format!("No credentials stored for '{}'", name)));
        }

        Ok(self.credentials.clone())
    }

    fn parameter(&self, name: &str, item_index: usize) -> Option<Value> {
        self.items.get(item_index)?.get(name).cloned()
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let HttpRequest { method, url, headers, query, body } = request;
        let mut builder = self.http.request(method, url.as_str());

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if !query.is_empty() {
            builder = builder.query(&query);
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(pairs) => builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(serde_urlencoded::to_string(&pairs)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
