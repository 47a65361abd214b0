use crate::client_error::{ClientError, DEFAULT_API_ERROR_MESSAGE};
use crate::context::{ExecutionContext, HttpRequest, HttpResponse, RequestBody};
use crate::credentials::{OAuthTokenData, RefreshPolicy, ZohoCredentials, CREDENTIAL_NAME};
use crate::params::{is_empty, query_pairs};
use crate::response::{ApiErrorBody, Envelope};
use crate::token_record::{AccessToken, TokenRecord};
use reqwest::Method;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Number of records requested per page by `request_all_pages()`.
pub const PAGE_SIZE: u64 = 200;

/// Header naming the Zoho Subscriptions organization a request applies to.
pub const ORGANIZATION_HEADER: &str = "X-com-zoho-subscriptions-organizationid";

/// Authenticated access to Zoho APIs on behalf of one workflow execution.
pub struct Client<C> {
    context: C,
    refresh_policy: RefreshPolicy,
}

impl<C: ExecutionContext> Client<C> {
    pub fn new(context: C) -> Client<C> {
        Client {
            context,
            refresh_policy: RefreshPolicy::default(),
        }
    }

    pub fn with_refresh_policy(mut self, refresh_policy: RefreshPolicy) -> Client<C> {
        self.refresh_policy = refresh_policy;
        self
    }

    /// Get the execution context this client dispatches through.
    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn refresh_policy(&self) -> RefreshPolicy {
        self.refresh_policy
    }
}

impl<C: ExecutionContext> Client<C> {
    /// Resolve the access token to use, refreshing it first when the refresh policy says so.
    ///
    /// Fails without touching the network when the credential has no token data. The refreshed
    /// values are only returned, never written back.
    pub async fn ensure_access_token(&self) -> Result<AccessToken, ClientError> {
        let credentials = self.context.credentials(CREDENTIAL_NAME).await?;
        let cached = credentials.token_data()?;

        if !self.refresh_policy.needs_refresh(cached) {
            debug!(expires_in = cached.expires_in, "reusing cached Zoho access token");

            return Ok(AccessToken {
                api_domain: cached.api_domain.clone(),
                access_token: cached.access_token.clone(),
                refresh_token: cached.refresh_token.clone(),
                expires_in: cached.expires_in,
            });
        }

        self.refresh_token(&credentials, cached).await
    }

    async fn refresh_token(
        &self,
        credentials: &ZohoCredentials,
        cached: &OAuthTokenData,
    ) -> Result<AccessToken, ClientError> {
        debug!(url = %credentials.access_token_url, "refreshing Zoho access token");

        let form = vec![
            (String::from("grant_type"), String::from("refresh_token")),
            (String::from("refresh_token"), cached.refresh_token.clone()),
            (String::from("client_id"), credentials.client_id.clone()),
            (String::from("client_secret"), credentials.client_secret.clone()),
            (String::from("redirect_uri"), credentials.redirect_uri.clone()),
        ];
        let request = HttpRequest::new(Method::POST, credentials.access_token_url.as_str())
            .body(RequestBody::Form(form));

        let response = self.context.send(request).await?;
        let record = TokenRecord::from_value(&response.json());

        if let Some(error) = record.error {
            warn!(%error, "Zoho token refresh rejected");
            return Err(ClientError::NeedsToken(error));
        }

        if !response.is_success() {
            return Err(api_error(&response));
        }

        let access_token = record
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::NeedsToken(String::from("No token received")))?;

        let token = AccessToken {
            api_domain: record.api_domain.unwrap_or_else(|| cached.api_domain.clone()),
            access_token,
            refresh_token: record
                .refresh_token
                .filter(|token| !token.is_empty())
                .unwrap_or_else(|| cached.refresh_token.clone()),
            expires_in: record.expires_in.unwrap_or(cached.expires_in),
        };

        debug!(
            token = %token.abbreviated(),
            api_domain = %token.api_domain,
            "received Zoho access token"
        );

        Ok(token)
    }

    /// Make an authenticated request and return the parsed response body.
    ///
    /// `base_url` falls back to the token's `api_domain`, and a `path` that is already an
    /// absolute URL is used as-is. Empty bodies and queries are not sent at all. A 200
    /// response whose first `data` item has `status: "error"` fails with that item's message.
    pub async fn request(
        &self,
        method: Method,
        base_url: Option<&str>,
        path: &str,
        body: &Value,
        query: &Map<String, Value>,
    ) -> Result<Value, ClientError> {
        let token = self.ensure_access_token().await?;
        let url = resolve_url(base_url.unwrap_or(&token.api_domain), path);

        let mut request = HttpRequest::new(method, url)
            .header("Authorization", token.authorization())
            .query(query_pairs(query));

        if !is_empty(body) {
            request = request.body(RequestBody::Json(body.clone()));
        }

        debug!(
            method = %request.method,
            url = %request.url,
            token = %token.abbreviated(),
            "sending Zoho request"
        );

        let response = self.context.send(request).await?;

        if !response.is_success() {
            return Err(api_error(&response));
        }

        let data = response.json();

        if let Some(error) = Envelope::from_value(&data).embedded_error() {
            let message = error
                .message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| String::from(DEFAULT_API_ERROR_MESSAGE));
            warn!(%message, "Zoho reported an error in a successful response");

            return Err(ClientError::Operation(message));
        }

        Ok(data)
    }

    /// Fetch every page of a list endpoint and return all records in page order.
    ///
    /// Pages are requested one after another with `page` starting at 1 and `per_page` fixed at
    /// `PAGE_SIZE`, until a response's `info.more_records` is absent or false. A bare empty
    /// array ends the walk immediately; a bare non-empty array is taken as the page's records.
    pub async fn request_all_pages(
        &self,
        method: Method,
        base_url: Option<&str>,
        endpoint: &str,
        body: &Value,
        query: &Map<String, Value>,
    ) -> Result<Vec<Value>, ClientError> {
        let mut query = query.clone();
        let mut page: u64 = 1;
        let mut records = Vec::new();

        query.insert(String::from("per_page"), Value::from(PAGE_SIZE));

        loop {
            query.insert(String::from("page"), Value::from(page));

            let response = self
                .request(method.clone(), base_url, endpoint, body, &query)
                .await?;

            let envelope = match response {
                Value::Array(items) if items.is_empty() => break,
                Value::Array(items) => {
                    records.extend(items);
                    break;
                }
                other => Envelope::from_value(&other),
            };

            let more_records = envelope.more_records();

            if let Some(data) = envelope.data {
                records.extend(data);
            }

            debug!(page, total = records.len(), more_records, "fetched Zoho page");

            if !more_records {
                break;
            }

            page += 1;
        }

        Ok(records)
    }

    /// Make an authenticated request against the Zoho Subscriptions (Billing) API.
    ///
    /// Differs from `request()` in sending the organization header and in returning the body
    /// without looking for embedded errors.
    pub async fn subscriptions_request(
        &self,
        method: Method,
        uri: &str,
        body: &Value,
        query: &Map<String, Value>,
        organization_id: &str,
    ) -> Result<Value, ClientError> {
        let token = self.ensure_access_token().await?;
        let url = resolve_url(&token.api_domain, uri);

        let mut request = HttpRequest::new(method, url)
            .header("Authorization", token.authorization())
            .header(ORGANIZATION_HEADER, organization_id)
            .query(query_pairs(query));

        if !is_empty(body) {
            request = request.body(RequestBody::Json(body.clone()));
        }

        debug!(
            method = %request.method,
            url = %request.url,
            organization_id,
            "sending Zoho Subscriptions request"
        );

        let response = self.context.send(request).await?;

        if !response.is_success() {
            return Err(api_error(&response));
        }

        Ok(response.json())
    }
}

/// Join a base URL and a path, unless the path is already absolute.
fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return String::from(path);
    }

    let base_url = base_url.trim_end_matches('/');

    if path.is_empty() {
        String::from(base_url)
    } else if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}

/// Classify a non-2xx response, preferring the upstream message for the user-facing text.
fn api_error(response: &HttpResponse) -> ClientError {
    let payload = response.json();
    let body = ApiErrorBody::from_value(&payload);
    let message = body
        .message()
        .unwrap_or_else(|| String::from(DEFAULT_API_ERROR_MESSAGE));

    let description = match &payload {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => serde_json::to_string_pretty(other).ok(),
    };

    warn!(status = response.status, %message, "Zoho request failed");

    ClientError::Api {
        message,
        description,
        status: Some(response.status),
    }
}
