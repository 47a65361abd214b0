//! Various response objects returned from Zoho.
//!
//! Fields are read one at a time out of the parsed body, so an unexpected type in a field this
//! crate never looks at cannot hide the ones it does.

use serde_json::Value;

/// Common wrapper around Zoho API responses.
///
/// List endpoints add `info`; Zoho keeps sending the last page while `more_records` is true,
/// so callers stop on the first page where it is absent or false.
#[derive(Debug, Default)]
pub struct Envelope {
    pub data: Option<Vec<Value>>,
    pub more_records: bool,
}

impl Envelope {
    /// Read the envelope fields out of an arbitrary response body. Bodies of other shapes
    /// yield an empty envelope.
    pub fn from_value(value: &Value) -> Envelope {
        let data = value.get("data").and_then(Value::as_array).cloned();
        let more_records = value
            .get("info")
            .and_then(|info| info.get("more_records"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Envelope { data, more_records }
    }

    pub fn more_records(&self) -> bool {
        self.more_records
    }

    /// The first `data` item, when it reports `status: "error"`.
    pub fn embedded_error(&self) -> Option<EmbeddedStatus> {
        let status = EmbeddedStatus::from_value(self.data.as_ref()?.first()?);

        if status.status.as_deref() == Some("error") {
            Some(status)
        } else {
            None
        }
    }
}

/// Per-record status reported inside `data`.
#[derive(Debug)]
pub struct EmbeddedStatus {
    pub status: Option<String>,
    pub message: Option<String>,
    pub code: Option<Value>,
}

impl EmbeddedStatus {
    pub fn from_value(value: &Value) -> EmbeddedStatus {
        EmbeddedStatus {
            status: string_field(value, "status"),
            message: string_field(value, "message"),
            code: value.get("code").cloned(),
        }
    }
}

/// Body of a failed API request. Only the message is used for the user-facing text; the whole
/// payload is kept as diagnostic detail.
#[derive(Debug, Default)]
pub struct ApiErrorBody {
    pub code: Option<Value>,
    pub message: Option<String>,
    pub data: Option<Value>,
}

impl ApiErrorBody {
    pub fn from_value(value: &Value) -> ApiErrorBody {
        ApiErrorBody {
            code: value.get("code").cloned(),
            message: string_field(value, "message"),
            data: value.get("data").cloned(),
        }
    }

    /// Upstream message, falling back to the message under `data` (the first item when it is a
    /// list, the object itself otherwise).
    pub fn message(&self) -> Option<String> {
        if let Some(message) = self.message.as_ref().filter(|message| !message.is_empty()) {
            return Some(message.clone());
        }

        let data = match self.data.as_ref()? {
            Value::Array(items) => items.first()?,
            other => other,
        };

        string_field(data, "message").filter(|message| !message.is_empty())
    }
}

fn string_field(value: &Value, name: &str) -> Option<String> {
    value.get(name).and_then(Value::as_str).map(String::from)
}
