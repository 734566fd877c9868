//! Regex extraction over server-rendered markup.
//!
//! The login form and the session token are only available inside HTML, so
//! both are pulled out with patterns anchored on the attribute layout the
//! service renders.

use lazy_static::lazy_static;
use regex::Regex;

use gv_core::error::{GvError, GvResult};

lazy_static! {
    // '_rnr_se': 'value' inside the inline bootstrap script
    static ref SPECIAL_TOKEN: Regex = Regex::new(r"'_rnr_se':\s*'([^']+)'").unwrap();
}

/// Hidden inputs the login POST must echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub galx: String,
    pub gxf: String,
    pub service: String,
    pub utf8: String,
    pub bgresponse: String,
}

impl LoginForm {
    /// Scrape the hidden login inputs from the login page.
    ///
    /// Every field is required; a missing one means the page layout changed.
    pub fn parse(html: &str) -> GvResult<Self> {
        Ok(Self {
            galx: hidden_input(html, "GALX")?,
            gxf: hidden_input(html, "gxf")?,
            service: hidden_input(html, "service")?,
            utf8: hidden_input(html, "_utf8")?,
            bgresponse: hidden_input(html, "bgresponse")?,
        })
    }
}

/// Find the value of `<input type="hidden" name="{name}" ... value="...">`.
///
/// Attributes between `name` and `value` (such as `id`) are tolerated, and
/// an `id` placed before `name` is accepted too.
pub fn hidden_input(html: &str, name: &str) -> GvResult<String> {
    let pattern = format!(
        r#"type="hidden"(?:\s+id="[^"]*")?\s+name="{}"(?:\s+id="[^"]*")?\s*value="([^"]*)""#,
        regex::escape(name)
    );
    let re = Regex::new(&pattern).map_err(|e| GvError::Internal(e.to_string()))?;
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| GvError::Scrape(format!("login form has no hidden {name} field")))
}

/// Extract the session token from the inbox page, if present.
pub fn special_token(html: &str) -> Option<String> {
    SPECIAL_TOKEN
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
