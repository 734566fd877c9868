//! gvoice API - session client for the Google Voice web interface.
//!
//! The service has no documented API. This crate signs in through the HTML
//! login form, scrapes the session token (`_rnr_se`) from the inbox page,
//! and replays the requests the web UI makes: token-signed form posts for
//! actions, raw-URL GETs for downloads and search, and XML feeds for
//! account state.

pub mod client;
pub mod endpoints;
pub mod feed;
pub mod response;
pub mod scrape;

// Re-export key types
pub use client::VoiceClient;
pub use endpoints::auth::Credentials;
pub use endpoints::calls::CallParams;
pub use feed::{Feed, FeedHandle, FeedPage};
pub use response::ActionResponse;
