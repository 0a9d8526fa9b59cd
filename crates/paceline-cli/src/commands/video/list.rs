//! List videos command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use paceline_core::model::VideoAngle;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only videos from this angle
    #[arg(long)]
    pub angle: Option<VideoAngle>,

    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let list = ctx
        .client
        .video()
        .list(args.angle)
        .await
        .context("Failed to list videos")?;

    if list.videos.is_empty() {
        eprintln!("{}", "No videos found.".dimmed());
        return Ok(());
    }

    for video in &list.videos {
        if args.json {
            output::json(video)?;
            continue;
        }
        println!(
            "{}  {:<5}  {:<10}  {}",
            video.id,
            video.angle.as_deref().unwrap_or("-"),
            video.analysis_status,
            video
                .original_filename
                .as_deref()
                .or(video.filename.as_deref())
                .unwrap_or("-")
        );
    }

    Ok(())
}
