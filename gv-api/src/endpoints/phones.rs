//! Contacts feed, forwarding phones and account settings.

use tracing::{debug, info};

use gv_core::error::{GvError, GvResult};
use gv_models::{ContactsFeed, Phone, Settings};

use crate::client::VoiceClient;
use crate::feed::Feed;
use crate::response::ActionResponse;

impl VoiceClient {
    /// The contacts feed, fetched once per session.
    pub async fn contacts(&self) -> GvResult<ContactsFeed> {
        if let Some(cached) = self.cached_contacts().await {
            return Ok(cached);
        }
        let feed = self.fetch_feed(Feed::Contacts).await?.contacts()?;
        debug!(
            "contacts feed loaded: {} contacts, {} phones",
            feed.contacts.len(),
            feed.phones.len()
        );
        self.cache_contacts(feed.clone()).await;
        Ok(feed)
    }

    /// Phones attached to the account.
    pub async fn phones(&self) -> GvResult<Vec<Phone>> {
        Ok(self.contacts().await?.phones)
    }

    /// Current account settings.
    pub async fn settings(&self) -> GvResult<Settings> {
        Ok(self.contacts().await?.settings)
    }

    /// Turn default call forwarding to a phone on or off.
    pub async fn set_forwarding(&self, phone_id: &str, enabled: bool) -> GvResult<ActionResponse> {
        if phone_id.trim().is_empty() {
            return Err(GvError::Validation("phone id is empty".into()));
        }
        info!(
            "{} forwarding to phone {phone_id}",
            if enabled { "enabling" } else { "disabling" }
        );
        self.validate_special(
            &self.endpoints().default_forward(),
            vec![
                ("enabled", if enabled { "1" } else { "0" }.to_string()),
                ("phoneId", phone_id.to_string()),
            ],
        )
        .await
    }

    pub async fn enable_phone(&self, phone: &Phone) -> GvResult<ActionResponse> {
        self.set_forwarding(&phone.id, true).await
    }

    pub async fn disable_phone(&self, phone: &Phone) -> GvResult<ActionResponse> {
        self.set_forwarding(&phone.id, false).await
    }
}
