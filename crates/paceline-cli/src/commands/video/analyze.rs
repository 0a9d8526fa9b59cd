//! Video analysis command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Video ID from 'paceline video list'
    pub id: String,
}

pub async fn run(ctx: &AppContext, args: AnalyzeArgs) -> Result<()> {
    let analysis = ctx
        .client
        .video()
        .analyze(&args.id)
        .await
        .context("Failed to analyze video")?;

    output::success(analysis.message.as_deref().unwrap_or("Analysis complete"));
    println!();
    output::json_pretty(&analysis.analysis_result)
}
