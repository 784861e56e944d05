//! Collection Normalization
//!
//! List endpoints answer either with a bare JSON array or, when the
//! server paginates, with an object whose `results` field holds the
//! array. Anything else is treated as an empty collection so a view
//! can still render, and items that fail to decode are dropped one by one.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a list payload, tolerating pagination and garbage
pub fn collection<T: DeserializeOwned>(path: &str, body: &[u8]) -> Vec<T> {
    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(path, error = %e, "List response is not JSON; treating as empty");
            return Vec::new();
        }
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(results)) => results,
            _ => {
                tracing::warn!(path, "List response has no results array; treating as empty");
                return Vec::new();
            }
        },
        other => {
            tracing::warn!(path, shape = %shape(&other), "Unexpected list response; treating as empty");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(path, index, error = %e, "Dropping undecodable list item");
                None
            }
        })
        .collect()
}

fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
