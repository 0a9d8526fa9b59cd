//! Request and response bodies of the running-analysis API.
//!
//! Optional fields are `Option` and are left out of the JSON when `None`;
//! the backend treats a missing field and an explicit default differently.

pub mod exercise;
pub mod export;
pub mod plan;
pub mod statistics;
pub mod user;
pub mod video;

pub use exercise::{
    BandData, BasicInfo, ExerciseQuery, ExerciseRecord, NewExercise, SleepData, TreadmillData,
};
pub use export::{ExportFormat, ExportQuery};
pub use plan::{
    GeneratePlan, GeneratedPlan, PlanDetail, PlanList, PlanListQuery, PlanStatus, PlanSummary,
    PlanType,
};
pub use statistics::{MetricSummary, Statistics, StatisticsQuery};
pub use user::{
    BindRequest, RegisterRequest, TokenResponse, User, UserUpdate, VerificationChannel,
    VerificationCodeResponse,
};
pub use video::{
    VideoAnalysis, VideoAngle, VideoList, VideoListQuery, VideoSummary, VideoUpload,
};

/// Timestamps as the backend writes them.
///
/// Stored records carry naive server-local times, while records without a
/// stored time fall back to an offset-qualified one. Both keep the wall
/// clock value that was sent.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.naive_local())
            .ok()
            .or_else(|| s.parse::<NaiveDateTime>().ok())
    }

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.collect_str(&dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => parse(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", s))),
        }
    }

}
