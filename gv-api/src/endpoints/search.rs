//! History search.

use tracing::debug;

use gv_core::error::GvResult;
use gv_models::Folder;

use crate::client::VoiceClient;
use crate::feed::FeedPage;

/// Query-string suffix for a search, e.g. `?q=call%20me`.
pub fn search_suffix(query: &str) -> String {
    format!("?q={}", urlencoding::encode(query))
}

impl VoiceClient {
    /// Search calls, voicemails and SMS. Returns the matches as a folder
    /// named `search`.
    pub async fn search(&self, query: &str) -> GvResult<Folder> {
        debug!("searching history");
        let response = self
            .get_raw(&self.endpoints().xml_search(), &search_suffix(query))
            .await?;
        let xml = Self::response_text(response).await?;
        FeedPage::parse("search", &xml)?.folder()
    }
}
