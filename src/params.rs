//! Helpers for turning node parameters into request parts.

use crate::client_error::ClientError;
use crate::context::ExecutionContext;
use serde_json::{Map, Value};

/// Parse a JSON body given as text by the user.
///
/// Blank text means "no body" and yields an empty object.
pub fn parse_json_parameter(field: &str, raw: &str) -> Result<Value, ClientError> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_str(raw).map_err(|_| ClientError::InvalidJson {
        field: String::from(field),
    })
}

/// Resolve a JSON parameter for one input item. Strings are parsed, values that are already
/// structured pass through, and a missing parameter is an empty object.
pub fn json_parameter<C>(context: &C, field: &str, item_index: usize) -> Result<Value, ClientError>
where
    C: ExecutionContext + ?Sized,
{
    match context.parameter(field, item_index) {
        None | Some(Value::Null) => Ok(Value::Object(Map::new())),
        Some(Value::String(raw)) => parse_json_parameter(field, &raw),
        Some(value) => Ok(value),
    }
}

/// Resolve a string parameter, failing when it is missing or blank.
pub fn required_string<C>(
    context: &C,
    field: &str,
    item_index: usize,
) -> Result<String, ClientError>
where
    C: ExecutionContext + ?Sized,
{
    match context.parameter(field, item_index) {
        Some(Value::String(value)) if !value.is_empty() => Ok(value),
        Some(Value::Number(value)) => Ok(value.to_string()),
        _ => Err(ClientError::Operation(format!("The parameter '{}' is required", field))),
    }
}

/// Flatten a scalar mapping into query pairs. Nulls are dropped and nested values are sent
/// as JSON text.
pub fn query_pairs(query: &Map<String, Value>) -> Vec<(String, String)> {
    query
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(text) => text.clone(),
                Value::Bool(flag) => flag.to_string(),
                Value::Number(number) => number.to_string(),
                other => other.to_string(),
            };

            Some((key.clone(), value))
        })
        .collect()
}

/// True when a body or query value carries nothing worth sending.
pub(crate) fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}
