//! In-memory `ExecutionContext` that records requests and replays scripted responses.

use crate::client_error::ClientError;
use crate::context::{ExecutionContext, HttpRequest, HttpResponse};
use crate::credentials::{OAuthTokenData, ZohoCredentials};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub const ACCESS_TOKEN: &str = "1000.cachedcachedcachedcached.cachedcached";

pub struct ScriptedContext {
    credentials: Option<ZohoCredentials>,
    parameters: HashMap<String, Value>,
    responses: Mutex<VecDeque<Result<HttpResponse, ClientError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedContext {
    pub fn new() -> ScriptedContext {
        ScriptedContext {
            credentials: None,
            parameters: HashMap::new(),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Credentials with a cached token and the given `expires_in`.
    pub fn with_token(self, expires_in: i64) -> ScriptedContext {
        let credentials = ZohoCredentials::new(
            String::from("client-id"),
            String::from("client-secret"),
            String::from("https://host.example/oauth2/callback"),
        )
        .with_token_data(OAuthTokenData {
            api_domain: String::from("https://www.zohoapis.com"),
            access_token: String::from(ACCESS_TOKEN),
            refresh_token: String::from("1000.refresh"),
            expires_in,
        });

        self.with_credentials(credentials)
    }

    pub fn with_credentials(mut self, credentials: ZohoCredentials) -> ScriptedContext {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_parameter(mut self, name: &str, value: Value) -> ScriptedContext {
        self.parameters.insert(String::from(name), value);
        self
    }

    pub fn respond(self, status: u16, body: &str) -> ScriptedContext {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: String::from(body),
        }));
        self
    }

    pub fn respond_json(self, body: Value) -> ScriptedContext {
        self.respond(200, &body.to_string())
    }

    pub fn fail(self, error: ClientError) -> ScriptedContext {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionContext for ScriptedContext {
    async fn credentials(&self, name: &str) -> Result<ZohoCredentials, ClientError> {
        self.credentials.clone().ok_or_else(|| {
            ClientError::Configuration(format!("No credentials stored for '{}'", name))
        })
    }

    fn parameter(&self, name: &str, _item_index: usize) -> Option<Value> {
        self.parameters.get(name).cloned()
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::from("no scripted response left")))
    }
}
