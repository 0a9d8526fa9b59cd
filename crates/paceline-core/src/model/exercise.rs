//! Exercise records: body metrics, wristband and treadmill readings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Body composition at the time of the exercise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Centimetres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    /// Kilograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_mass: Option<f64>,
    /// Percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_content: Option<f64>,
}

/// Sleep breakdown in hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deep_sleep: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_sleep: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rem_sleep: Option<f64>,
}

/// Readings from a fitness wristband.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandData {
    /// Beats per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u32>,
    /// Minutes per kilometre.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_load: Option<u32>,
    /// Kilocalories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep: Option<SleepData>,
}

/// Readings from a treadmill session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreadmillData {
    /// km/h.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incline: Option<f64>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Kilometres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// Body of `POST /api/exercise`.
///
/// When `user_id` is left out the server files the record under its
/// default user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExercise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_info: Option<BasicInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band_data: Option<BandData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treadmill_data: Option<TreadmillData>,
}

impl NewExercise {
    /// Whether any reading is present at all.
    pub fn is_empty(&self) -> bool {
        self.basic_info.is_none() && self.band_data.is_none() && self.treadmill_data.is_none()
    }
}

/// A stored exercise record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    #[serde(default)]
    pub id: Option<String>,
    /// Server-local time of creation.
    #[serde(default, with = "super::timestamp")]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub data: NewExercise,
}

/// Query of `GET /api/exercise`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
}
