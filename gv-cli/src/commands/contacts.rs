//! Contact listing.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

use gv_core::error::GvResult;

use super::Context;
use crate::OutputFormat;

pub async fn run(ctx: &Context, limit: Option<usize>) -> GvResult<()> {
    let client = super::connect(ctx).await?;
    let feed = client.contacts().await?;

    let mut contacts: Vec<_> = feed.contacts.values().collect();
    contacts.sort_by_key(|c| c.get("name").and_then(|n| n.as_str()).unwrap_or("").to_lowercase());
    contacts.truncate(limit.unwrap_or(usize::MAX));

    match ctx.format {
        OutputFormat::Json => super::print_json(&contacts)?,
        OutputFormat::Text => {
            if contacts.is_empty() {
                println!("No contacts.");
                return Ok(());
            }
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Name", "Number"]);

            for c in &contacts {
                let field = |key: &str| {
                    c.get(key)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.is_empty())
                        .unwrap_or("-")
                        .to_string()
                };
                table.add_row(vec![field("name"), field("phoneNumber")]);
            }

            println!("{table}");
            println!("\n{} contact(s) shown", contacts.len());
        }
    }

    Ok(())
}
