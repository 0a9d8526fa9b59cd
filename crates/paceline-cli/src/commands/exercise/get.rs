//! Get exercise record command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Record ID
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print the full record as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &AppContext, args: GetArgs) -> Result<()> {
    let record = ctx
        .client
        .exercise()
        .get(&args.id)
        .await
        .context("Failed to fetch exercise record")?;

    if args.json || args.pretty {
        return output::json_value(&record, args.pretty);
    }

    super::print_record(&record);
    Ok(())
}
