//! Create exercise record command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use paceline_core::model::{BandData, BasicInfo, NewExercise, TreadmillData};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Read the whole record from a JSON file ("-" for stdin)
    #[arg(long, conflicts_with_all = ["user_id", "heart_rate", "pace", "calories", "training_load", "speed", "incline", "duration", "distance", "age", "height", "weight"])]
    pub from_json: Option<PathBuf>,

    /// Owner of the record (server default: user001)
    #[arg(long)]
    pub user_id: Option<String>,

    /// Average heart rate in bpm
    #[arg(long)]
    pub heart_rate: Option<u32>,

    /// Pace in min/km
    #[arg(long)]
    pub pace: Option<f64>,

    /// Calories burned in kcal
    #[arg(long)]
    pub calories: Option<u32>,

    #[arg(long)]
    pub training_load: Option<u32>,

    /// Treadmill speed in km/h
    #[arg(long)]
    pub speed: Option<f64>,

    /// Treadmill incline in percent
    #[arg(long)]
    pub incline: Option<f64>,

    /// Duration in minutes
    #[arg(long)]
    pub duration: Option<u32>,

    /// Distance in km
    #[arg(long)]
    pub distance: Option<f64>,

    #[arg(long)]
    pub age: Option<u32>,

    /// Height in cm
    #[arg(long)]
    pub height: Option<f64>,

    /// Weight in kg
    #[arg(long)]
    pub weight: Option<f64>,
}

impl CreateArgs {
    /// Build the record from flags. Groups with no flag set are left out.
    fn to_exercise(&self) -> NewExercise {
        let basic = BasicInfo {
            age: self.age,
            height: self.height,
            weight: self.weight,
            ..BasicInfo::default()
        };
        let band = BandData {
            heart_rate: self.heart_rate,
            pace: self.pace,
            calories: self.calories,
            training_load: self.training_load,
            sleep: None,
        };
        let treadmill = TreadmillData {
            speed: self.speed,
            incline: self.incline,
            duration: self.duration,
            distance: self.distance,
        };

        NewExercise {
            user_id: self.user_id.clone(),
            basic_info: (basic != BasicInfo::default()).then_some(basic),
            band_data: (band != BandData::default()).then_some(band),
            treadmill_data: (treadmill != TreadmillData::default()).then_some(treadmill),
        }
    }
}

fn read_json(path: &Path) -> Result<NewExercise> {
    let content = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&content).context("Invalid exercise JSON")
}

pub async fn run(ctx: &AppContext, args: CreateArgs) -> Result<()> {
    let exercise = match &args.from_json {
        Some(path) => read_json(path)?,
        None => args.to_exercise(),
    };

    let record = ctx
        .client
        .exercise()
        .create(&exercise)
        .await
        .context("Failed to create exercise record")?;

    output::success("Exercise record created");
    println!();
    super::print_record(&record);

    Ok(())
}
