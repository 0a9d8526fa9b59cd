//! Training plans under `/api/training-plan`.

use tracing::instrument;

use paceline_core::Result;
use paceline_core::model::{
    GeneratePlan, GeneratedPlan, PlanDetail, PlanList, PlanListQuery, PlanStatus,
};

use crate::ApiClient;

#[derive(Debug, Clone, Copy)]
pub struct PlanApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PlanApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Ask the server to generate a plan from recent exercise history.
    ///
    /// Generation runs a language model on the server and can take a while.
    #[instrument(skip(self))]
    pub async fn generate(&self, params: &GeneratePlan) -> Result<GeneratedPlan> {
        params.validate()?;
        self.client
            .post_query(&["api", "training-plan", "generate"], params)
            .await
    }

    /// List the user's plans, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self, status: Option<PlanStatus>) -> Result<PlanList> {
        let query = PlanListQuery {
            status_filter: status,
        };
        self.client.get(&["api", "training-plan", "list"], &query).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<PlanDetail> {
        self.client.get(&["api", "training-plan", id], &()).await
    }
}
