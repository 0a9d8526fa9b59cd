//! Generated training plans.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// Plan horizon: `short` is 1-4 weeks, `long` is 1-6 months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Short,
    Long,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Short => "short",
            PlanType::Long => "long",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(PlanType::Short),
            "long" => Ok(PlanType::Long),
            _ => Err(InvalidInputError::field(
                "plan_type",
                format!("'{}' is not one of short, long", s),
            )),
        }
    }
}

/// Lifecycle of a stored plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Active,
    Completed,
    Cancelled,
}

impl FromStr for PlanStatus {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PlanStatus::Active),
            "completed" => Ok(PlanStatus::Completed),
            "cancelled" => Ok(PlanStatus::Cancelled),
            _ => Err(InvalidInputError::field(
                "status",
                format!("'{}' is not one of active, completed, cancelled", s),
            )),
        }
    }
}

/// Parameters of `POST /api/training-plan/generate`.
///
/// The server reads these from the query string, not the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratePlan {
    pub plan_type: PlanType,
    /// Free-form goal such as `improve_pace`, `improve_endurance` or
    /// `lose_weight`.
    pub goal: String,
    /// Days of history to base the plan on.
    pub days: u32,
}

impl Default for GeneratePlan {
    fn default() -> Self {
        Self {
            plan_type: PlanType::Short,
            goal: "improve_pace".to_string(),
            days: 30,
        }
    }
}

impl GeneratePlan {
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.goal.trim().is_empty() {
            return Err(InvalidInputError::field("goal", "must not be empty"));
        }
        if self.days == 0 {
            return Err(InvalidInputError::field("days", "must be at least 1"));
        }
        Ok(())
    }
}

/// Response of `POST /api/training-plan/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    #[serde(default)]
    pub message: Option<String>,
    pub plan_id: String,
    /// The plan document produced by the model: title, duration, goal,
    /// weekly_schedule, daily_plans, suggestions.
    pub plan: serde_json::Value,
}

/// One entry of `GET /api/training-plan/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub id: String,
    #[serde(default)]
    pub plan_type: Option<PlanType>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Length in weeks as the plan generator reported it; usually a number.
    #[serde(default)]
    pub duration: Option<serde_json::Value>,
    #[serde(default)]
    pub status: Option<PlanStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of `GET /api/training-plan/list`, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanList {
    #[serde(default)]
    pub plans: Vec<PlanSummary>,
}

/// Query of `GET /api/training-plan/list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<PlanStatus>,
}

/// Response of `GET /api/training-plan/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDetail {
    pub id: String,
    #[serde(default)]
    pub plan_type: Option<PlanType>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub plan_data: serde_json::Value,
    #[serde(default)]
    pub history_data_summary: serde_json::Value,
    #[serde(default)]
    pub status: Option<PlanStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
}
