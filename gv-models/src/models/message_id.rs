//! Message identifiers.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use gv_core::error::{GvError, GvResult};

lazy_static! {
    static ref SHA1_HEX: Regex = Regex::new(r"^[a-fA-F0-9]{40}$").unwrap();
}

/// Identifier of a message: a 40 character SHA1 hex digest.
///
/// The same value names a message in feeds, in message operations, and in the
/// recording download URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Validate and wrap a message id.
    pub fn parse(id: &str) -> GvResult<Self> {
        let id = id.trim();
        if is_sha1(id) {
            Ok(Self(id.to_string()))
        } else {
            Err(GvError::InvalidMessageId(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether a string is a SHA1 hex digest.
pub fn is_sha1(s: &str) -> bool {
    SHA1_HEX.is_match(s)
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for MessageId {
    type Err = GvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        MessageId::parse(&raw).map_err(serde::de::Error::custom)
    }
}
