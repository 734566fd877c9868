//! Action response envelope.
//!
//! Form actions (call, cancel, sms, message operations, forwarding) answer
//! with a small JSON object whose `ok` flag says whether the service accepted
//! the request:
//! ```json
//! { "ok": true, "data": { "code": 0 } }
//! ```

use serde::{Deserialize, Serialize};

use gv_core::error::{GvError, GvResult};

/// JSON body returned by a form action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    /// Whether the action was accepted. Absent means rejected.
    #[serde(default)]
    pub ok: bool,
    /// Optional payload; shape varies by action.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Optional error detail.
    #[serde(default)]
    pub error: Option<String>,
    /// Every other key the service sent.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl ActionResponse {
    /// Parse an action response body.
    ///
    /// Anything that is not a JSON object is a validation failure, since the
    /// service answers rejected sessions with an HTML page.
    pub fn parse(body: &str) -> GvResult<Self> {
        serde_json::from_str(body).map_err(|_| {
            GvError::Validation(format!(
                "there was a problem with the service: {}",
                preview(body)
            ))
        })
    }

    /// Require `"ok": true`.
    pub fn validate(self) -> GvResult<Self> {
        if self.ok {
            Ok(self)
        } else {
            let detail = self
                .error
                .clone()
                .or_else(|| self.data.as_ref().map(|d| d.to_string()))
                .unwrap_or_else(|| "request rejected".into());
            Err(GvError::Validation(format!(
                "there was a problem with the service: {detail}"
            )))
        }
    }

    /// Parse and validate in one step.
    pub fn parse_ok(body: &str) -> GvResult<Self> {
        Self::parse(body)?.validate()
    }
}

/// First line of a body, bounded, for error messages.
fn preview(body: &str) -> String {
    let line = body.trim().lines().next().unwrap_or("");
    if line.chars().count() > 120 {
        let cut: String = line.chars().take(117).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}
