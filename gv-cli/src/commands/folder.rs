//! Folder listing and search.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;

use gv_api::Feed;
use gv_core::error::GvResult;
use gv_models::{Folder, Message};

use super::Context;
use crate::OutputFormat;

pub async fn folder(ctx: &Context, name: &str, unread: bool, limit: Option<usize>) -> GvResult<()> {
    let feed: Feed = name.parse()?;
    let client = super::connect(ctx).await?;
    let folder = client.folder(feed).await?;
    print_folder(ctx.format, &folder, unread, limit)
}

pub async fn search(ctx: &Context, query: &str, limit: Option<usize>) -> GvResult<()> {
    let client = super::connect(ctx).await?;
    let results = client.search(query).await?;
    print_folder(ctx.format, &results, false, limit)
}

fn print_folder(format: OutputFormat, folder: &Folder, unread: bool, limit: Option<usize>) -> GvResult<()> {
    let shown: Vec<&Message> = folder
        .messages
        .iter()
        .filter(|m| !unread || !m.is_read)
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    match format {
        OutputFormat::Json => super::print_json(&shown),
        OutputFormat::Text => {
            if shown.is_empty() {
                println!("No messages in {}.", folder.name);
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Id", "When", "With", "", "Text"]);

            for m in &shown {
                let when = m
                    .display_start_date_time
                    .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| m.start_time.format("%Y-%m-%d %H:%M").to_string());
                let mut flags = String::new();
                if !m.is_read {
                    flags.push('*');
                }
                if m.is_starred {
                    flags.push('★');
                }
                if m.has_recording() {
                    flags.push('♪');
                }
                table.add_row(vec![
                    m.id.to_string(),
                    when,
                    m.counterparty().to_string(),
                    flags,
                    super::truncate(m.message_text.as_deref().unwrap_or(""), 50),
                ]);
            }

            println!("{table}");
            println!(
                "\n{} of {} message(s) in {}, {} unread",
                shown.len(),
                folder.total_size,
                style(&folder.name).bold(),
                folder.unread().count()
            );
            Ok(())
        }
    }
}
