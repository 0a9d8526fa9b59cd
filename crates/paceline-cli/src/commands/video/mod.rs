//! Video subcommands.

mod analyze;
mod list;
mod preview;
mod upload;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct VideoCommand {
    #[command(subcommand)]
    pub command: VideoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum VideoSubcommand {
    /// Upload a running video (mp4, avi, mov, mkv, webm; up to 100 MiB)
    Upload(upload::UploadArgs),

    /// List uploaded videos
    List(list::ListArgs),

    /// Run form analysis on an uploaded video
    Analyze(analyze::AnalyzeArgs),

    /// Download an uploaded video
    Preview(preview::PreviewArgs),
}

pub async fn handle(ctx: &AppContext, cmd: VideoCommand) -> Result<()> {
    ctx.require_login()?;

    match cmd.command {
        VideoSubcommand::Upload(args) => upload::run(ctx, args).await,
        VideoSubcommand::List(args) => list::run(ctx, args).await,
        VideoSubcommand::Analyze(args) => analyze::run(ctx, args).await,
        VideoSubcommand::Preview(args) => preview::run(ctx, args).await,
    }
}
