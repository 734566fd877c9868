//! CLI command implementations.

pub mod call;
pub mod contacts;
pub mod download;
pub mod folder;
pub mod login;
pub mod messages;
pub mod phones;
pub mod settings;
pub mod sms;

use std::path::PathBuf;

use console::style;
use dialoguer::{Input, Password};
use serde::Serialize;

use gv_api::{ActionResponse, Credentials, VoiceClient};
use gv_core::config::{AuthConfig, ConfigHandle};
use gv_core::error::{GvError, GvResult};

use crate::OutputFormat;

/// Shared state handed to every command.
pub struct Context {
    pub config: ConfigHandle,
    /// File the configuration was read from and `--save` writes to.
    pub config_path: PathBuf,
    pub format: OutputFormat,
}

/// Resolve credentials: explicit email, then config, then an interactive prompt.
///
/// The stored password is only used with the stored email.
pub async fn credentials(ctx: &Context, email: Option<String>) -> GvResult<Credentials> {
    let auth = ctx.config.read().await.auth.clone();
    let (email, stored_password) = pick_account(email, auth);

    let email = match email {
        Some(e) => e,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .map_err(|e| GvError::Internal(e.to_string()))?,
    };

    let password = match stored_password {
        Some(p) => p,
        None => Password::new()
            .with_prompt(format!("Password for {email}"))
            .interact()
            .map_err(|e| GvError::Internal(e.to_string()))?,
    };

    Ok(Credentials::new(email, password))
}

/// Choose the account email and, if it belongs to that account, the stored
/// password.
fn pick_account(explicit: Option<String>, auth: AuthConfig) -> (Option<String>, Option<String>) {
    let stored_email = auth.email.filter(|e| !e.is_empty());
    let stored_password = auth.password.filter(|p| !p.is_empty());

    match explicit.filter(|e| !e.is_empty()) {
        Some(e) if stored_email.as_deref() == Some(e.as_str()) => (Some(e), stored_password),
        Some(e) => (Some(e), None),
        None => {
            let password = stored_email.as_ref().and(stored_password);
            (stored_email, password)
        }
    }
}

/// Build a client from config and sign in.
pub async fn connect(ctx: &Context) -> GvResult<VoiceClient> {
    let client = VoiceClient::from_config(&*ctx.config.read().await)?;
    let credentials = credentials(ctx, None).await?;
    client.login(credentials).await?;
    Ok(client)
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> GvResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Report an accepted action.
pub fn print_action(format: OutputFormat, summary: &str, response: &ActionResponse) -> GvResult<()> {
    match format {
        OutputFormat::Json => print_json(response),
        OutputFormat::Text => {
            println!("  {} {summary}", style("OK").green().bold());
            Ok(())
        }
    }
}

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Truncate a string to at most `max_chars` characters, appending an
/// ellipsis if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars > 3 {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_chars).collect()
    }
}
