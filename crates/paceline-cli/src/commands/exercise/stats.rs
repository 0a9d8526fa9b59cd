//! Statistics command implementation.

use anyhow::{Context, Result};
use clap::Args;

use paceline_core::model::MetricSummary;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Only records of this user
    #[arg(long)]
    pub user_id: Option<String>,

    /// Print the raw statistics as JSON
    #[arg(long)]
    pub json: bool,
}

fn metric(label: &str, unit: &str, summary: &MetricSummary) {
    if summary.is_empty() {
        output::field(label, "no data");
        return;
    }
    output::field(
        label,
        &format!(
            "avg {:.1} {unit}, min {:.1} {unit}, max {:.1} {unit} ({} samples)",
            summary.avg,
            summary.min,
            summary.max,
            summary.data.len(),
        ),
    );
}

pub async fn run(ctx: &AppContext, args: StatsArgs) -> Result<()> {
    let stats = ctx
        .client
        .exercise()
        .statistics(args.user_id.as_deref())
        .await
        .context("Failed to fetch statistics")?;

    if args.json {
        return output::json_pretty(&stats);
    }

    metric("Heart rate", "bpm", &stats.heart_rate);
    metric("Pace", "min/km", &stats.pace);
    metric("Calories", "kcal", &stats.calories);
    if let (Some(first), Some(last)) = (stats.dates.first(), stats.dates.last()) {
        output::field("Period", &format!("{} to {}", first, last));
    }

    Ok(())
}
