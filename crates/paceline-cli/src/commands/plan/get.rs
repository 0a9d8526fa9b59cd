//! Get plan command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Plan ID
    pub id: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(ctx: &AppContext, args: GetArgs) -> Result<()> {
    let plan = ctx
        .client
        .plan()
        .get(&args.id)
        .await
        .context("Failed to fetch plan")?;

    output::json_value(&plan, args.pretty)
}
