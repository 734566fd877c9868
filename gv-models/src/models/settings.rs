//! Account settings model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gv_core::error::{GvError, GvResult};

use super::remaining_fields;

const KNOWN_FIELDS: &[&str] = &["primaryDid", "language", "timezone"];

/// Account settings as reported in the contacts feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// The account's Voice number.
    pub primary_did: Option<String>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl Settings {
    pub fn from_server_map(value: &Value) -> GvResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| GvError::Feed("settings is not an object".into()))?;
        let text = |key: &str| map.get(key).and_then(|v| v.as_str()).map(String::from);
        Ok(Self {
            primary_did: text("primaryDid"),
            language: text("language"),
            timezone: text("timezone"),
            extra: remaining_fields(map, KNOWN_FIELDS),
        })
    }

    /// Look up a setting by its service name.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "primaryDid" => self.primary_did.clone().map(Value::String),
            "language" => self.language.clone().map(Value::String),
            "timezone" => self.timezone.clone().map(Value::String),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// All settings flattened back into service names, sorted by key.
    pub fn entries(&self) -> Vec<(String, Value)> {
        let mut out: Vec<(String, Value)> = self
            .extra
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for key in KNOWN_FIELDS {
            if let Some(v) = self.get(key) {
                out.push((key.to_string(), v));
            }
        }
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}
