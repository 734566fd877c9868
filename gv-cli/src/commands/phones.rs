//! Forwarding phone commands.

use clap::Subcommand;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;

use gv_core::error::{GvError, GvResult};

use super::Context;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum PhonesAction {
    /// List the phones on the account.
    List,
    /// Forward calls to a phone.
    Enable {
        /// Phone id, as shown by `phones list`.
        id: String,
    },
    /// Stop forwarding calls to a phone.
    Disable {
        id: String,
    },
}

pub async fn run(ctx: &Context, action: PhonesAction) -> GvResult<()> {
    let client = super::connect(ctx).await?;

    match action {
        PhonesAction::List => {
            let phones = client.phones().await?;
            match ctx.format {
                OutputFormat::Json => super::print_json(&phones)?,
                OutputFormat::Text => {
                    if phones.is_empty() {
                        println!("No phones on this account.");
                        return Ok(());
                    }
                    let mut table = Table::new();
                    table
                        .load_preset(UTF8_FULL)
                        .apply_modifier(UTF8_ROUND_CORNERS)
                        .set_content_arrangement(ContentArrangement::Dynamic);
                    table.set_header(vec!["Id", "Name", "Number", "Type", "Forwarding"]);

                    for p in &phones {
                        let forwarding = match p.is_enabled() {
                            Some(true) => style("on").green().to_string(),
                            Some(false) => style("off").dim().to_string(),
                            None => "-".to_string(),
                        };
                        table.add_row(vec![
                            p.id.clone(),
                            p.name.clone().unwrap_or_default(),
                            p.formatted_number
                                .clone()
                                .or_else(|| p.phone_number.clone())
                                .unwrap_or_default(),
                            p.phone_type.map(|t| t.to_string()).unwrap_or_default(),
                            forwarding,
                        ]);
                    }
                    println!("{table}");
                }
            }
        }
        PhonesAction::Enable { id } => {
            let phone = find_phone(&client, &id).await?;
            let response = client.enable_phone(&phone).await?;
            super::print_action(ctx.format, &format!("Forwarding to phone {id} enabled."), &response)?;
        }
        PhonesAction::Disable { id } => {
            let phone = find_phone(&client, &id).await?;
            let response = client.disable_phone(&phone).await?;
            super::print_action(ctx.format, &format!("Forwarding to phone {id} disabled."), &response)?;
        }
    }

    Ok(())
}

async fn find_phone(client: &gv_api::VoiceClient, id: &str) -> GvResult<gv_models::Phone> {
    client
        .contacts()
        .await?
        .phone(id)
        .cloned()
        .ok_or_else(|| GvError::Validation(format!("no phone with id {id}")))
}
