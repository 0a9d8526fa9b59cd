//! Aggregate metrics returned by `GET /api/statistics`.

use serde::{Deserialize, Serialize};

/// Summary of one metric across the matching records.
///
/// The server reports zeros and an empty series when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub avg: f64,
    pub max: f64,
    pub min: f64,
    #[serde(default)]
    pub data: Vec<f64>,
}

impl MetricSummary {
    /// Whether the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Heart rate, pace and calorie summaries with the dates of the samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub heart_rate: MetricSummary,
    pub pace: MetricSummary,
    pub calories: MetricSummary,
    /// `YYYY-MM-DD` per sample.
    #[serde(default)]
    pub dates: Vec<String>,
}

/// Query of `GET /api/statistics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}
