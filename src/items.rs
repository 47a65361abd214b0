//! Output items emitted by a node.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One item of a node's output batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeItem {
    pub json: Value,
}

/// Wrap response data as the node's output batch.
///
/// Arrays are split into one item per element and strings holding JSON (some Sheets and Tasks
/// endpoints answer with JSON text) are parsed first. Anything that isn't an object ends up
/// under a `data` key.
pub fn return_json_array(values: Vec<Value>) -> Vec<NodeItem> {
    let mut items = Vec::with_capacity(values.len());

    for value in values {
        match parse_text(value) {
            Value::Array(elements) => items.extend(elements.into_iter().map(into_item)),
            other => items.push(into_item(other)),
        }
    }

    items
}

fn parse_text(value: Value) -> Value {
    match value {
        Value::String(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
        other => other,
    }
}

fn into_item(value: Value) -> NodeItem {
    match value {
        Value::Object(_) => NodeItem { json: value },
        other => NodeItem {
            json: serde_json::json!({ "data": other }),
        },
    }
}
