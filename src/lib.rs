//! # zoho-gateway
//!
//! Authenticated request helper shared by Zoho workflow nodes (Sheets, Billing/Subscriptions,
//! Mail, Tasks, CRM).
//!
//! Every call resolves an OAuth2 access token from the `zohoApi` credential, refreshing it
//! against the accounts server when needed, sends one request with the
//! `Authorization: Zoho-oauthtoken <token>` header, and turns Zoho's error envelopes into a
//! `ClientError`. List endpoints can be walked page by page with `request_all_pages()`.
//!
//! You can read more information about the Zoho OAuth flow here:
//! [https://www.zoho.com/crm/developer/docs/api/oauth-overview.html](https://www.zoho.com/crm/developer/docs/api/oauth-overview.html)
//!
//! The host runtime plugs in through the `ExecutionContext` trait. `HttpContext` is a
//! ready-made implementation for use outside a host.
//!
//! ### Example
//!
//! ```no_run
//! use reqwest::Method;
//! use serde_json::{Map, Value};
//! use zoho_gateway::{Client, HttpContext, ZohoCredentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zoho_gateway::ClientError> {
//!     let raw = std::fs::read_to_string("zoho-credentials.json").unwrap();
//!     let credentials = ZohoCredentials::from_json(&raw)?;
//!     let client = Client::new(HttpContext::new(credentials)?);
//!
//!     let leads = client
//!         .request_all_pages(Method::GET, None, "/crm/v2/Leads", &Value::Null, &Map::new())
//!         .await?;
//!
//!     println!("{} leads", leads.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod client_error;
mod context;
mod credentials;
mod http_context;
pub mod items;
pub mod params;
pub mod response;
mod token_record;

#[cfg(test)]
mod test_support;

pub use client::{Client, ORGANIZATION_HEADER, PAGE_SIZE};
pub use client_error::ClientError;
pub use context::{ExecutionContext, HttpRequest, HttpResponse, RequestBody};
pub use credentials::{
    ClientAuthentication, OAuthTokenData, RefreshPolicy, Region, ZohoCredentials, CREDENTIAL_NAME,
};
pub use http_context::HttpContext;
pub use token_record::{AccessToken, TokenRecord};
