//! Training plan subcommands.

mod generate;
mod get;
mod list;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct PlanCommand {
    #[command(subcommand)]
    pub command: PlanSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PlanSubcommand {
    /// Generate a plan from recent exercise history
    Generate(generate::GenerateArgs),

    /// List plans, newest first
    List(list::ListArgs),

    /// Show one plan in full
    Get(get::GetArgs),
}

pub async fn handle(ctx: &AppContext, cmd: PlanCommand) -> Result<()> {
    ctx.require_login()?;

    match cmd.command {
        PlanSubcommand::Generate(args) => generate::run(ctx, args).await,
        PlanSubcommand::List(args) => list::run(ctx, args).await,
        PlanSubcommand::Get(args) => get::run(ctx, args).await,
    }
}
