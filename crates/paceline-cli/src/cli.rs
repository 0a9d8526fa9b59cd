//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::exercise::ExerciseCommand;
use crate::commands::export::ExportArgs;
use crate::commands::plan::PlanCommand;
use crate::commands::video::VideoCommand;

/// Client for the paceline running-analysis backend.
#[derive(Parser, Debug)]
#[command(name = "paceline")]
#[command(author, version = env!("PACELINE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to connect and where to keep the login token.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Backend base URL
    #[arg(
        long,
        env = "PACELINE_API",
        default_value = "http://localhost:8000",
        global = true
    )]
    pub api: String,

    /// Directory for the stored login token [default: platform data directory]
    #[arg(long, env = "PACELINE_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account: register, login, profile
    Auth(AuthCommand),

    /// Exercise records and statistics
    Exercise(ExerciseCommand),

    /// Running-form videos
    Video(VideoCommand),

    /// Generated training plans
    Plan(PlanCommand),

    /// Download exercise data as CSV, JSON or PDF
    Export(ExportArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn api_defaults_to_localhost() {
        let cli = Cli::try_parse_from(["paceline", "auth", "logout"]).unwrap();
        if std::env::var_os("PACELINE_API").is_none() {
            assert_eq!(cli.global.api, "http://localhost:8000");
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "paceline",
            "plan",
            "list",
            "--api",
            "https://run.example.com",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.global.api, "https://run.example.com");
        assert_eq!(cli.verbose, 2);
    }
}
