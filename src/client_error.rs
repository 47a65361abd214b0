use thiserror::Error;

/// Fallback message when a failed response carries no upstream `message`.
pub const DEFAULT_API_ERROR_MESSAGE: &str = "The Zoho API returned an error.";

/// Various errors returned while talking to Zoho.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The credential is missing data required before any request can be made, such as the
    /// cached OAuth2 token record.
    #[error("{0}")]
    Configuration(String),

    /// The accounts server refused to refresh the access token, or answered without one.
    #[error("{0}")]
    NeedsToken(String),

    /// The API answered successfully at the transport level but reported a logical failure
    /// (`{"data":[{"status":"error","message":"..."}]}`). The message is passed through verbatim.
    #[error("{0}")]
    Operation(String),

    /// Non-2xx response or network failure.
    ///
    /// `message` is meant for users, `description` holds the full serialized error payload when
    /// one was received.
    #[error("{message}")]
    Api {
        message: String,
        description: Option<String>,
        status: Option<u16>,
    },

    /// A JSON parameter supplied by the caller could not be parsed.
    #[error("'{field}' must be valid JSON")]
    InvalidJson { field: String },
}

impl ClientError {
    /// HTTP status of the failed response, if the error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Diagnostic detail attached to an API error.
    pub fn description(&self) -> Option<&str> {
        match self {
            ClientError::Api { description, .. } => description.as_deref(),
            _ => None,
        }
    }
}

impl From<String> for ClientError {
    fn from(err: String) -> ClientError {
        ClientError::Operation(err)
    }
}

impl From<&str> for ClientError {
    fn from(err: &str) -> ClientError {
        ClientError::Operation(String::from(err))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Operation(err.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for ClientError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        ClientError::Operation(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> ClientError {
        ClientError::Api {
            message: err.to_string(),
            description: None,
            status: err.status().map(|status| status.as_u16()),
        }
    }
}
