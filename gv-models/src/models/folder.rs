//! Folder model: the parsed JSON payload of a message feed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use gv_core::error::{GvError, GvResult};

use super::int_field;
use super::message::Message;
use super::message_id::MessageId;

/// A page of messages from one folder feed (inbox, voicemail, search, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    /// Total number of messages in the folder, across all pages.
    pub total_size: i64,
    /// Unread counts keyed by label.
    pub unread_counts: BTreeMap<String, i64>,
    pub results_per_page: Option<i64>,
    /// Messages on this page, newest first.
    pub messages: Vec<Message>,
}

impl Folder {
    /// Build a folder from a feed's JSON document.
    pub fn from_server_map(name: &str, value: &Value) -> GvResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| GvError::Feed(format!("{name} feed json is not an object")))?;

        let mut messages = match map.get("messages") {
            Some(Value::Object(entries)) => entries
                .iter()
                .map(|(id, data)| Message::from_server_map(name, id, data))
                .collect::<GvResult<Vec<_>>>()?,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                return Err(GvError::Feed(format!(
                    "{name} feed messages is not an object"
                )))
            }
        };
        messages.sort_by(|a, b| b.start_time.cmp(&a.start_time));

        let unread_counts = map
            .get("unreadCounts")
            .and_then(|v| v.as_object())
            .map(|counts| {
                counts
                    .iter()
                    .filter_map(|(k, v)| v.as_i64().map(|n| (k.clone(), n)))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            name: name.to_string(),
            total_size: int_field(map, "totalSize").unwrap_or(messages.len() as i64),
            unread_counts,
            results_per_page: int_field(map, "resultsPerPage"),
            messages,
        })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages not yet marked read.
    pub fn unread(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.is_read)
    }

    pub fn find(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| &m.id == id)
    }
}
