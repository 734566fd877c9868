//! Feed model definitions.

pub mod contacts;
pub mod folder;
pub mod message;
pub mod message_id;
pub mod phone;
pub mod settings;

use serde_json::{Map, Value};

/// Remove the named keys from a JSON object, returning what remains.
pub(crate) fn remaining_fields(map: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    map.iter()
        .filter(|(k, _)| !known.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Read a field the service sends either as a string or a number.
pub(crate) fn str_or_number(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read an integer the service sends either as a number or a numeric string.
pub(crate) fn int_field(map: &Map<String, Value>, key: &str) -> Option<i64> {
    match map.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
