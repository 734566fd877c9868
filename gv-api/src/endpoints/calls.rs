//! Click-to-call: placing and cancelling calls.
//!
//! The service rings the forwarding phone first and bridges it to the
//! outgoing number once answered.

use tracing::info;

use gv_core::constants::UNDEFINED;
use gv_core::error::{GvError, GvResult};
use gv_models::PhoneType;

use crate::client::VoiceClient;
use crate::response::ActionResponse;

/// Parameters for placing a call. Unset fields fall back to `[gvoice]` config.
#[derive(Debug, Clone, Default)]
pub struct CallParams {
    pub outgoing_number: String,
    pub forwarding_number: Option<String>,
    pub phone_type: Option<PhoneType>,
    pub subscriber_number: Option<String>,
}

impl CallParams {
    pub fn to(outgoing_number: impl Into<String>) -> Self {
        Self {
            outgoing_number: outgoing_number.into(),
            ..Self::default()
        }
    }

    pub fn from_phone(mut self, forwarding_number: impl Into<String>, phone_type: PhoneType) -> Self {
        self.forwarding_number = Some(forwarding_number.into());
        self.phone_type = Some(phone_type);
        self
    }
}

impl VoiceClient {
    /// Place a call to `outgoing_number` via the forwarding phone.
    pub async fn call(&self, params: CallParams) -> GvResult<ActionResponse> {
        let forwarding = params
            .forwarding_number
            .or_else(|| self.voice_config().forwarding_number.clone())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| GvError::MissingConfig("gvoice.forwarding_number".into()))?;
        let phone_type = params
            .phone_type
            .unwrap_or_else(|| PhoneType::from(self.voice_config().phone_type));

        info!("calling {} from {forwarding}", params.outgoing_number);
        self.validate_special(
            &self.endpoints().call(),
            vec![
                ("outgoingNumber", params.outgoing_number),
                ("forwardingNumber", forwarding),
                (
                    "subscriberNumber",
                    params.subscriber_number.unwrap_or_else(|| UNDEFINED.into()),
                ),
                ("phoneType", phone_type.code().to_string()),
                ("remember", "1".into()),
            ],
        )
        .await
    }

    /// Cancel a call being placed. Fails if no matching call is in progress.
    pub async fn cancel(
        &self,
        outgoing_number: Option<&str>,
        forwarding_number: Option<&str>,
    ) -> GvResult<ActionResponse> {
        self.validate_special(
            &self.endpoints().cancel(),
            vec![
                ("outgoingNumber", outgoing_number.unwrap_or(UNDEFINED).into()),
                ("forwardingNumber", forwarding_number.unwrap_or(UNDEFINED).into()),
                ("cancelType", "C2C".into()),
            ],
        )
        .await
    }
}
