use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wrapper around a token sent back from the Zoho accounts server on refresh.
///
/// `refresh_token` is usually omitted, in which case the stored one stays valid. A rejected
/// refresh comes back with only `error` set.
#[derive(Debug, Default)]
pub struct TokenRecord {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub api_domain: Option<String>,
    pub error: Option<String>,
    pub expires_in: Option<i64>,
}

impl TokenRecord {
    /// Read the token fields out of a response body; fields of unexpected types are absent.
    pub fn from_value(value: &Value) -> TokenRecord {
        let string_field = |name: &str| value.get(name).and_then(Value::as_str).map(String::from);

        TokenRecord {
            access_token: string_field("access_token"),
            refresh_token: string_field("refresh_token"),
            api_domain: string_field("api_domain"),
            error: string_field("error"),
            expires_in: value.get("expires_in").and_then(Value::as_i64),
        }
    }
}

/// Token values resolved for immediate use by a request.
///
/// Nothing here is persisted by this crate; hosts that want to keep a refreshed token write it
/// back into their own credential store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub api_domain: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl AccessToken {
    /// Value of the `Authorization` header for Zoho APIs.
    pub fn authorization(&self) -> String {
        format!("Zoho-oauthtoken {}", self.access_token)
    }

    /// Get an abbreviated version of the access token, safe to log.
    pub fn abbreviated(&self) -> String {
        abbreviate(&self.access_token)
    }
}

pub(crate) fn abbreviate(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();

    if chars.len() < 16 {
        return String::from("****");
    }

    let prefix: String = chars[..9].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();

    format!("{}..{}", prefix, suffix)
}
