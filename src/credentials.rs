//! OAuth2 credential data as stored by the host.

use crate::client_error::ClientError;
use serde::{Deserialize, Serialize};

/// Name under which hosts register the Zoho credential type.
pub const CREDENTIAL_NAME: &str = "zohoApi";

pub const DEFAULT_AUTH_URL: &str = "https://accounts.zoho.com/oauth/v2/auth";
pub const DEFAULT_ACCESS_TOKEN_URL: &str = "https://accounts.zoho.com/oauth/v2/token";
pub const DEFAULT_SCOPE: &str = "ZohoCRM.modules.ALL,ZohoCRM.settings.all,ZohoCRM.users.all,ZohoSubscriptions.fullaccess.ALL,ZohoSheet.dataAPI.ALL,ZohoMail.tasks.ALL,WorkDrive.files.ALL,ZohoMail.accounts.READ";
pub const DEFAULT_AUTH_QUERY_PARAMETERS: &str = "access_type=offline";

/// Zoho data centers with their own accounts server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Au,
    Cn,
    Eu,
    In,
    Us,
}

impl Region {
    pub fn access_token_url(self) -> &'static str {
        match self {
            Region::Au => "https://accounts.zoho.com.au/oauth/v2/token",
            Region::Cn => "https://accounts.zoho.com.cn/oauth/v2/token",
            Region::Eu => "https://accounts.zoho.eu/oauth/v2/token",
            Region::In => "https://accounts.zoho.in/oauth/v2/token",
            Region::Us => DEFAULT_ACCESS_TOKEN_URL,
        }
    }

    /// Only the CN data center has a separate authorization endpoint.
    pub fn auth_url(self) -> &'static str {
        match self {
            Region::Cn => "https://accounts.zoho.com.cn/oauth/v2/auth",
            _ => DEFAULT_AUTH_URL,
        }
    }
}

/// How the client id and secret are sent to the token endpoint. Zoho takes them in the form
/// body only, so any other mode is rejected when the credential is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientAuthentication {
    #[default]
    Body,
}

/// When a cached token is exchanged for a fresh one.
///
/// `ExpiresInPositive` is what deployed nodes do today: a positive `expires_in` triggers a
/// refresh and zero or less reuses the cached token. It reads inverted against the usual
/// "seconds remaining" meaning, so `ExpiresInLapsed` is available once that is confirmed
/// against the live accounts server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    #[default]
    ExpiresInPositive,
    ExpiresInLapsed,
}

impl RefreshPolicy {
    pub fn needs_refresh(self, token: &OAuthTokenData) -> bool {
        match self {
            RefreshPolicy::ExpiresInPositive => token.expires_in > 0,
            RefreshPolicy::ExpiresInLapsed => token.expires_in <= 0,
        }
    }
}

/// Token cache sub-record managed by the host's credential store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OAuthTokenData {
    #[serde(default)]
    pub api_domain: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: i64,
}

/// Stored OAuth2 client configuration plus cached token state for one Zoho account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZohoCredentials {
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_access_token_url")]
    pub access_token_url: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_auth_query_parameters")]
    pub auth_query_parameters: String,
    #[serde(default)]
    pub authentication: ClientAuthentication,
    #[serde(default)]
    pub redirect_uri: String,
    #[serde(default)]
    pub oauth_token_data: Option<OAuthTokenData>,
}

fn default_auth_url() -> String {
    String::from(DEFAULT_AUTH_URL)
}

fn default_access_token_url() -> String {
    String::from(DEFAULT_ACCESS_TOKEN_URL)
}

fn default_scope() -> String {
    String::from(DEFAULT_SCOPE)
}

fn default_auth_query_parameters() -> String {
    String::from(DEFAULT_AUTH_QUERY_PARAMETERS)
}

impl ZohoCredentials {
    /// Create credentials for the US data center with no cached token.
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> ZohoCredentials {
        ZohoCredentials {
            auth_url: default_auth_url(),
            access_token_url: default_access_token_url(),
            client_id,
            client_secret,
            scope: default_scope(),
            auth_query_parameters: default_auth_query_parameters(),
            authentication: ClientAuthentication::Body,
            redirect_uri,
            oauth_token_data: None,
        }
    }

    /// Parse credentials from the JSON document a host stores for `zohoApi`.
    pub fn from_json(raw: &str) -> Result<ZohoCredentials, ClientError> {
        serde_json::from_str(raw).map_err(|error| {
            ClientError::Configuration(format!("Invalid Zoho credentials: {}", error))
        })
    }

    /// Point the credential at another data center's accounts server.
    pub fn with_region(mut self, region: Region) -> ZohoCredentials {
        self.auth_url = String::from(region.auth_url());
        self.access_token_url = String::from(region.access_token_url());
        self
    }

    pub fn with_token_data(mut self, token: OAuthTokenData) -> ZohoCredentials {
        self.oauth_token_data = Some(token);
        self
    }

    /// Cached token record, or a configuration error when the account was never connected.
    pub fn token_data(&self) -> Result<&OAuthTokenData, ClientError> {
        self.oauth_token_data.as_ref().ok_or_else(|| {
            ClientError::Configuration(String::from(
                "Missing Zoho OAuth2 token data in credentials.",
            ))
        })
    }
}
