//! List plans command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use paceline_core::model::PlanStatus;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only plans with this status: active, completed or cancelled
    #[arg(long)]
    pub status: Option<PlanStatus>,

    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let list = ctx
        .client
        .plan()
        .list(args.status)
        .await
        .context("Failed to list plans")?;

    if list.plans.is_empty() {
        eprintln!("{}", "No plans found.".dimmed());
        return Ok(());
    }

    for plan in &list.plans {
        if args.json {
            output::json(plan)?;
            continue;
        }
        println!(
            "{}  {:<5}  {}  {}",
            plan.id,
            plan.plan_type.map(|t| t.as_str()).unwrap_or("-"),
            plan.created_at.as_deref().unwrap_or("-").dimmed(),
            plan.title.as_deref().or(plan.goal.as_deref()).unwrap_or("-")
        );
    }

    Ok(())
}
