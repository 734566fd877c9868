//! Account settings command.

use console::style;

use gv_core::error::GvResult;

use super::Context;
use crate::OutputFormat;

pub async fn run(ctx: &Context) -> GvResult<()> {
    let client = super::connect(ctx).await?;
    let settings = client.settings().await?;

    match ctx.format {
        OutputFormat::Json => super::print_json(&settings)?,
        OutputFormat::Text => {
            println!("{}", style("Account Settings").bold().underlined());
            for (key, value) in settings.entries() {
                let shown = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                println!("  {key:<24} {}", super::truncate(&shown, 60));
            }
        }
    }

    Ok(())
}
