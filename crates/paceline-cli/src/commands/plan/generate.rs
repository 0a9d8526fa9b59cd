//! Plan generation command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use paceline_core::model::{GeneratePlan, PlanType};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// short (1-4 weeks) or long (1-6 months)
    #[arg(long, default_value = "short")]
    pub plan_type: PlanType,

    /// Training goal, e.g. improve_pace, improve_endurance, lose_weight
    #[arg(long, default_value = "improve_pace")]
    pub goal: String,

    /// Days of history to base the plan on
    #[arg(long, default_value_t = 30)]
    pub days: u32,

    /// Pretty-print the generated plan
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(ctx: &AppContext, args: GenerateArgs) -> Result<()> {
    let params = GeneratePlan {
        plan_type: args.plan_type,
        goal: args.goal,
        days: args.days,
    };

    eprintln!("{}", "Generating plan, this can take a minute...".dimmed());

    let generated = ctx
        .client
        .plan()
        .generate(&params)
        .await
        .context("Failed to generate plan")?;

    output::success(generated.message.as_deref().unwrap_or("Plan generated"));
    output::field("Plan ID", &generated.plan_id);
    println!();
    output::json_value(&generated.plan, args.pretty)
}
