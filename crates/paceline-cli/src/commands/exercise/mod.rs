//! Exercise subcommands.

mod create;
mod get;
mod list;
mod stats;

use anyhow::Result;
use clap::{Args, Subcommand};

use paceline_core::model::ExerciseRecord;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct ExerciseCommand {
    #[command(subcommand)]
    pub command: ExerciseSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ExerciseSubcommand {
    /// List exercise records, newest first
    List(list::ListArgs),

    /// Store a new exercise record
    Create(create::CreateArgs),

    /// Fetch a single record
    Get(get::GetArgs),

    /// Heart rate, pace and calorie statistics
    Stats(stats::StatsArgs),
}

pub async fn handle(ctx: &AppContext, cmd: ExerciseCommand) -> Result<()> {
    match cmd.command {
        ExerciseSubcommand::List(args) => list::run(ctx, args).await,
        ExerciseSubcommand::Create(args) => create::run(ctx, args).await,
        ExerciseSubcommand::Get(args) => get::run(ctx, args).await,
        ExerciseSubcommand::Stats(args) => stats::run(ctx, args).await,
    }
}

/// One-line summary of a record.
fn summary(record: &ExerciseRecord) -> String {
    let mut parts = Vec::new();

    if let Some(band) = &record.data.band_data {
        if let Some(hr) = band.heart_rate {
            parts.push(format!("{} bpm", hr));
        }
        if let Some(pace) = band.pace {
            parts.push(format!("{:.2} min/km", pace));
        }
        if let Some(kcal) = band.calories {
            parts.push(format!("{} kcal", kcal));
        }
    }
    if let Some(treadmill) = &record.data.treadmill_data {
        if let Some(distance) = treadmill.distance {
            parts.push(format!("{:.2} km", distance));
        }
        if let Some(minutes) = treadmill.duration {
            parts.push(format!("{} min", minutes));
        }
    }

    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}

fn print_record(record: &ExerciseRecord) {
    output::opt_field("ID", record.id.as_deref());
    output::opt_field(
        "Time",
        record.timestamp.as_ref().map(output::timestamp),
    );
    output::opt_field("User", record.data.user_id.as_deref());
    output::field("Summary", &summary(record));
}
