//! List exercise records command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use paceline_core::model::ExerciseQuery;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only records of this user
    #[arg(long)]
    pub user_id: Option<String>,

    /// Maximum number of records (server default 100)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Number of records to skip
    #[arg(long)]
    pub skip: Option<u32>,

    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let query = ExerciseQuery {
        user_id: args.user_id,
        limit: args.limit,
        skip: args.skip,
    };

    let records = ctx
        .client
        .exercise()
        .list(&query)
        .await
        .context("Failed to list exercise records")?;

    if records.is_empty() {
        eprintln!("{}", "No records found.".dimmed());
        return Ok(());
    }

    for record in &records {
        if args.json {
            output::json(record)?;
        } else {
            println!(
                "{}  {}  {}",
                record
                    .timestamp
                    .as_ref()
                    .map(output::timestamp)
                    .unwrap_or_else(|| "----------------".to_string())
                    .dimmed(),
                record.id.as_deref().unwrap_or("-"),
                super::summary(record)
            );
        }
    }

    Ok(())
}
