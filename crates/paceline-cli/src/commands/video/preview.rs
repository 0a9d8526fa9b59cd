//! Video download command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Video ID from 'paceline video list'
    pub id: String,

    /// Directory to save the video in
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

pub async fn run(ctx: &AppContext, args: PreviewArgs) -> Result<()> {
    let video = ctx
        .client
        .video()
        .preview(&args.id)
        .await
        .context("Failed to download video")?;

    let path = video
        .save_to(&args.out)
        .await
        .context("Failed to save video")?;

    output::success(&format!("Saved {}", path.display()));
    output::field("Size", &format!("{} bytes", video.bytes.len()));

    Ok(())
}
