//! Service operations organized by category.
//!
//! Each module adds methods to [`VoiceClient`](crate::client::VoiceClient)
//! for a group of related pages.

pub mod auth;
pub mod calls;
pub mod download;
pub mod messages;
pub mod phones;
pub mod search;
pub mod sms;
