//! gvoice models - typed views over the JSON carried inside Google Voice feeds.
//!
//! Feeds deliver loosely structured JSON. Each model pulls out the fields the
//! client relies on and keeps every remaining key in an `extra` map, so values
//! the service adds later are still reachable through `get`.

pub mod models;

// Re-export key types
pub use models::contacts::ContactsFeed;
pub use models::folder::Folder;
pub use models::message::Message;
pub use models::message_id::MessageId;
pub use models::phone::{Phone, PhoneType};
pub use models::settings::Settings;
