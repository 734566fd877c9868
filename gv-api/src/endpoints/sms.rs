//! SMS sending.

use tracing::info;

use gv_core::error::{GvError, GvResult};

use crate::client::VoiceClient;
use crate::response::ActionResponse;

impl VoiceClient {
    /// Send a text message to `phone_number`.
    pub async fn send_sms(&self, phone_number: &str, text: &str) -> GvResult<ActionResponse> {
        if phone_number.trim().is_empty() {
            return Err(GvError::Validation("sms recipient is empty".into()));
        }
        info!("sending sms to {phone_number} ({} chars)", text.chars().count());
        self.validate_special(
            &self.endpoints().sms(),
            vec![
                ("phoneNumber", phone_number.to_string()),
                ("text", text.to_string()),
            ],
        )
        .await
    }
}
