//! Login and logout commands.

use console::style;

use gv_api::VoiceClient;
use gv_core::error::GvResult;

use super::Context;
use crate::OutputFormat;

/// Sign in, optionally saving the credentials that worked.
pub async fn login(ctx: &Context, email: Option<String>, save: bool) -> GvResult<()> {
    let client = VoiceClient::from_config(&*ctx.config.read().await)?;
    let credentials = super::credentials(ctx, email).await?;
    let (email, password) = (credentials.email.clone(), credentials.password.clone());

    println!("{} Signing in as {email}...", style("[1/2]").bold().dim());
    client.login(credentials).await?;
    println!("  {} Signed in.", style("OK").green().bold());

    println!("{} Loading account...", style("[2/2]").bold().dim());
    let settings = client.settings().await?;
    let phones = client.phones().await?;

    match ctx.format {
        OutputFormat::Json => super::print_json(&serde_json::json!({
            "email": email,
            "primaryDid": settings.primary_did,
            "phones": phones.len(),
        }))?,
        OutputFormat::Text => {
            println!(
                "  Number:  {}",
                settings.primary_did.as_deref().unwrap_or("unknown")
            );
            println!("  Phones:  {}", phones.len());
        }
    }

    if save {
        {
            let mut cfg = ctx.config.write().await;
            cfg.auth.email = Some(email);
            cfg.auth.password = Some(password);
        }
        ctx.config.save_to(&ctx.config_path).await?;
        println!(
            "  {} Credentials saved to {}",
            style("OK").green(),
            ctx.config_path.display()
        );
    }

    Ok(())
}

/// Sign in and sign out again, confirming the service ends the session.
pub async fn logout(ctx: &Context) -> GvResult<()> {
    let client = super::connect(ctx).await?;
    client.logout().await?;
    println!("  {} Signed out.", style("OK").green().bold());
    Ok(())
}
