//! Contacts feed model: address book subset, phones and settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gv_core::error::{GvError, GvResult};

use super::phone::Phone;
use super::settings::Settings;

/// Parsed JSON payload of the contacts feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactsFeed {
    /// Address book entries keyed by contact id, as sent.
    pub contacts: Map<String, Value>,
    /// Phones attached to the account, ordered by id.
    pub phones: Vec<Phone>,
    pub settings: Settings,
}

impl ContactsFeed {
    pub fn from_server_map(value: &Value) -> GvResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| GvError::Feed("contacts feed json is not an object".into()))?;

        let contacts = map
            .get("contacts")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default();

        let mut phones = match map.get("phones") {
            Some(Value::Object(entries)) => entries
                .values()
                .map(Phone::from_server_map)
                .collect::<GvResult<Vec<_>>>()?,
            _ => Vec::new(),
        };
        phones.sort_by(|a, b| match (a.id.parse::<i64>(), b.id.parse::<i64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.id.cmp(&b.id),
        });

        let settings = match map.get("settings") {
            Some(v @ Value::Object(_)) => Settings::from_server_map(v)?,
            _ => Settings::default(),
        };

        Ok(Self {
            contacts,
            phones,
            settings,
        })
    }

    pub fn phone(&self, id: &str) -> Option<&Phone> {
        self.phones.iter().find(|p| p.id == id)
    }

    /// Display names of the address book entries that carry one, sorted.
    pub fn contact_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .contacts
            .values()
            .filter_map(|c| c.get("name").and_then(|n| n.as_str()))
            .filter(|n| !n.is_empty())
            .map(String::from)
            .collect();
        names.sort();
        names
    }
}
