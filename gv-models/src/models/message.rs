//! Message model.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use gv_core::error::{GvError, GvResult};

use super::message_id::MessageId;
use super::{int_field, remaining_fields};

/// Format of `displayStartDateTime`, e.g. "3/14/15 9:26 PM".
pub const DISPLAY_DATE_TIME_FORMAT: &str = "%m/%d/%y %I:%M %p";

const KNOWN_FIELDS: &[&str] = &[
    "id",
    "phoneNumber",
    "displayNumber",
    "startTime",
    "relativeStartTime",
    "note",
    "isRead",
    "isSpam",
    "isTrash",
    "star",
    "isStarred",
    "labels",
    "type",
    "messageText",
    "duration",
];

/// A call, voicemail, recording or SMS thread from a folder feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// Name of the folder feed this message was read from.
    pub folder: String,
    pub phone_number: Option<String>,
    pub display_number: Option<String>,
    pub start_time: DateTime<Utc>,
    pub display_start_date_time: Option<NaiveDateTime>,
    pub relative_start_time: Option<String>,
    pub note: Option<String>,
    pub is_read: bool,
    pub is_spam: bool,
    pub is_trash: bool,
    pub is_starred: bool,
    pub labels: Vec<String>,
    /// Service message type code.
    pub message_type: Option<i64>,
    /// Voicemail transcript or SMS text.
    pub message_text: Option<String>,
    /// Duration in seconds for calls and recordings.
    pub duration: Option<i64>,
    /// Every field not mapped above.
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl Message {
    /// Create a Message from one entry of a folder's `messages` map.
    pub fn from_server_map(folder: &str, id: &str, value: &Value) -> GvResult<Self> {
        let id = MessageId::parse(id)?;
        let map = value
            .as_object()
            .ok_or_else(|| GvError::Feed(format!("message {id} is not an object")))?;

        let start_ms = int_field(map, "startTime")
            .ok_or_else(|| GvError::Feed(format!("message {id} has no startTime")))?;
        let start_time = DateTime::<Utc>::from_timestamp_millis(start_ms)
            .ok_or_else(|| GvError::Feed(format!("message {id} startTime out of range")))?;

        let display_start_date_time = match map.get("displayStartDateTime").and_then(|v| v.as_str()) {
            Some(raw) => Some(parse_display_date_time(raw).ok_or_else(|| {
                GvError::Feed(format!("message {id} has unparseable displayStartDateTime {raw:?}"))
            })?),
            None => None,
        };

        let flag = |key: &str| map.get(key).and_then(|v| v.as_bool()).unwrap_or(false);
        let text = |key: &str| map.get(key).and_then(|v| v.as_str()).map(String::from);

        let labels = map
            .get("labels")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|l| l.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            id,
            folder: folder.to_string(),
            phone_number: text("phoneNumber"),
            display_number: text("displayNumber"),
            start_time,
            display_start_date_time,
            relative_start_time: text("relativeStartTime"),
            note: text("note"),
            is_read: flag("isRead"),
            is_spam: flag("isSpam"),
            is_trash: flag("isTrash"),
            is_starred: flag("star") || flag("isStarred"),
            labels,
            message_type: int_field(map, "type"),
            message_text: text("messageText"),
            duration: int_field(map, "duration"),
            extra: remaining_fields(map, KNOWN_FIELDS),
        })
    }

    /// Time-of-day part of `displayStartDateTime`.
    pub fn display_start_time(&self) -> Option<NaiveTime> {
        self.display_start_date_time.map(|dt| dt.time())
    }

    /// Look up any field the service sent, mapped or not.
    ///
    /// Display strings (`displayStartDateTime`, `displayStartTime`) come back
    /// exactly as sent.
    pub fn get(&self, key: &str) -> Option<Value> {
        let string = |v: &Option<String>| v.clone().map(Value::String);
        match key {
            "id" => Some(Value::String(self.id.to_string())),
            "phoneNumber" => string(&self.phone_number),
            "displayNumber" => string(&self.display_number),
            "startTime" => Some(Value::from(self.start_time.timestamp_millis())),
            "relativeStartTime" => string(&self.relative_start_time),
            "note" => string(&self.note),
            "isRead" => Some(Value::Bool(self.is_read)),
            "isSpam" => Some(Value::Bool(self.is_spam)),
            "isTrash" => Some(Value::Bool(self.is_trash)),
            "star" | "isStarred" => Some(Value::Bool(self.is_starred)),
            "labels" => Some(Value::from(self.labels.clone())),
            "type" => self.message_type.map(Value::from),
            "messageText" => string(&self.message_text),
            "duration" => self.duration.map(Value::from),
            _ => self.extra.get(key).cloned(),
        }
    }

    /// Best available label for the other party.
    pub fn counterparty(&self) -> &str {
        self.display_number
            .as_deref()
            .or(self.phone_number.as_deref())
            .unwrap_or("unknown")
    }

    /// Whether a recording can be downloaded for this message.
    pub fn has_recording(&self) -> bool {
        self.extra
            .get("hasMp3")
            .and_then(|v| v.as_bool())
            .unwrap_or_else(|| {
                self.labels
                    .iter()
                    .any(|l| l == "voicemail" || l == "recorded")
            })
    }
}

/// Parse the service's `displayStartDateTime` format.
pub fn parse_display_date_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), DISPLAY_DATE_TIME_FORMAT).ok()
}
