//! Export command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use paceline_core::model::ExportFormat;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// csv, json or pdf
    pub format: ExportFormat,

    /// Only records of this user
    #[arg(long)]
    pub user_id: Option<String>,

    /// Directory to save the file in
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

pub async fn run(ctx: &AppContext, args: ExportArgs) -> Result<()> {
    eprintln!("{}", format!("Exporting {}...", args.format).dimmed());

    let payload = ctx
        .client
        .export()
        .download(args.format, args.user_id.as_deref())
        .await
        .context("Failed to export data")?;

    let path = payload
        .save_to(&args.out)
        .await
        .context("Failed to save export")?;

    output::success(&format!("Saved {}", path.display()));
    output::field("Size", &format!("{} bytes", payload.bytes.len()));

    Ok(())
}
