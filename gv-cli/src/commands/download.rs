//! Recording download command.

use std::path::PathBuf;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use gv_core::error::GvResult;
use gv_models::MessageId;

use super::Context;
use crate::OutputFormat;

pub async fn run(ctx: &Context, id: &str, output: Option<PathBuf>) -> GvResult<()> {
    let id = MessageId::parse(id)?;
    let dir = match output {
        Some(dir) => dir,
        None => ctx.config.read().await.effective_download_dir()?,
    };
    let client = super::connect(ctx).await?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Downloading [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let pb_clone = pb.clone();
    let path = client
        .download_with_progress(&id, &dir, move |downloaded, total| {
            if total > 0 {
                pb_clone.set_length(total);
            }
            pb_clone.set_position(downloaded);
        })
        .await?;
    pb.finish_and_clear();

    let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    match ctx.format {
        OutputFormat::Json => super::print_json(&serde_json::json!({
            "id": id,
            "path": path,
            "bytes": size,
        })),
        OutputFormat::Text => {
            println!(
                "  {} Saved to {} ({})",
                style("OK").green().bold(),
                path.display(),
                super::format_bytes(size)
            );
            Ok(())
        }
    }
}
