//! Forwarding phone model.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gv_core::error::{GvError, GvResult};

use super::{int_field, remaining_fields, str_or_number};

const KNOWN_FIELDS: &[&str] = &["id", "name", "phoneNumber", "formattedNumber", "type"];

/// Kind of phone a number rings, as coded by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum PhoneType {
    Home,
    Mobile,
    Work,
    Gizmo,
    Other(u8),
}

impl PhoneType {
    pub fn code(&self) -> u8 {
        match self {
            PhoneType::Home => 1,
            PhoneType::Mobile => 2,
            PhoneType::Work => 3,
            PhoneType::Gizmo => 7,
            PhoneType::Other(c) => *c,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PhoneType::Home => "home",
            PhoneType::Mobile => "mobile",
            PhoneType::Work => "work",
            PhoneType::Gizmo => "gizmo",
            PhoneType::Other(_) => "other",
        }
    }
}

impl From<u8> for PhoneType {
    fn from(code: u8) -> Self {
        match code {
            1 => PhoneType::Home,
            2 => PhoneType::Mobile,
            3 => PhoneType::Work,
            7 => PhoneType::Gizmo,
            other => PhoneType::Other(other),
        }
    }
}

impl From<PhoneType> for u8 {
    fn from(t: PhoneType) -> Self {
        t.code()
    }
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A phone attached to the account that calls can be forwarded to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phone {
    /// Service-assigned phone id, used when toggling forwarding.
    pub id: String,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub formatted_number: Option<String>,
    pub phone_type: Option<PhoneType>,
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl Phone {
    /// Create a Phone from one entry of the contacts feed `phones` map.
    pub fn from_server_map(value: &Value) -> GvResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| GvError::Feed("phone entry is not an object".into()))?;
        let id = str_or_number(map, "id")
            .ok_or_else(|| GvError::Feed("phone entry missing id".into()))?;
        let text = |key: &str| map.get(key).and_then(|v| v.as_str()).map(String::from);

        Ok(Self {
            id,
            name: text("name"),
            phone_number: text("phoneNumber"),
            formatted_number: text("formattedNumber"),
            phone_type: int_field(map, "type")
                .and_then(|c| u8::try_from(c).ok())
                .map(PhoneType::from),
            extra: remaining_fields(map, KNOWN_FIELDS),
        })
    }

    /// Whether forwarding to this phone is currently enabled, when reported.
    pub fn is_enabled(&self) -> Option<bool> {
        self.extra.get("enabled").and_then(|v| {
            v.as_bool()
                .or_else(|| v.as_i64().map(|n| n != 0))
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = self
            .formatted_number
            .as_deref()
            .or(self.phone_number.as_deref())
            .unwrap_or("?");
        match &self.name {
            Some(name) => write!(f, "{name} {number}"),
            None => write!(f, "{number}"),
        }
    }
}
