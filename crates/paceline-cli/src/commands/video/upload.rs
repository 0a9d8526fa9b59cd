//! Video upload command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use paceline_core::model::VideoAngle;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Video file to upload
    pub file: PathBuf,

    /// Camera position: front, side or back
    #[arg(long, default_value = "front")]
    pub angle: VideoAngle,
}

pub async fn run(ctx: &AppContext, args: UploadArgs) -> Result<()> {
    eprintln!("{}", format!("Uploading {}...", args.file.display()).dimmed());

    let upload = ctx
        .client
        .video()
        .upload(&args.file, args.angle)
        .await
        .context("Failed to upload video")?;

    output::success(upload.message.as_deref().unwrap_or("Video uploaded"));
    println!();
    output::field("Video ID", &upload.video_id);
    output::field("Stored as", &upload.filename);
    output::field("Angle", &upload.angle);
    output::field("Size", &format!("{} bytes", upload.file_size));

    Ok(())
}
