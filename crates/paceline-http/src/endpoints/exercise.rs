//! Exercise records and statistics.

use tracing::instrument;

use paceline_core::Result;
use paceline_core::error::InvalidInputError;
use paceline_core::model::{ExerciseQuery, ExerciseRecord, NewExercise, Statistics, StatisticsQuery};

use crate::ApiClient;

#[derive(Debug, Clone, Copy)]
pub struct ExerciseApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ExerciseApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List records, newest first. The server defaults to 100 records.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ExerciseQuery) -> Result<Vec<ExerciseRecord>> {
        self.client.get(&["api", "exercise"], query).await
    }

    /// Store a new record and return it with its id and timestamp.
    #[instrument(skip(self))]
    pub async fn create(&self, exercise: &NewExercise) -> Result<ExerciseRecord> {
        if exercise.is_empty() {
            return Err(InvalidInputError::Other {
                message: "an exercise record needs basic info, band data or treadmill data"
                    .to_string(),
            }
            .into());
        }
        self.client.post(&["api", "exercise"], exercise).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<ExerciseRecord> {
        self.client.get(&["api", "exercise", id], &()).await
    }

    /// Aggregated heart rate, pace and calories over the stored records.
    #[instrument(skip(self))]
    pub async fn statistics(&self, user_id: Option<&str>) -> Result<Statistics> {
        let query = StatisticsQuery {
            user_id: user_id.map(str::to_string),
        };
        self.client.get(&["api", "statistics"], &query).await
    }
}
