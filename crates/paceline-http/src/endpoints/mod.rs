//! Endpoint groups of the running-analysis API.
//!
//! Each group borrows the [`ApiClient`](crate::ApiClient) and is obtained
//! from it, e.g. `client.plan().list(None)`.

mod auth;
mod exercise;
mod export;
mod plan;
mod video;

pub use auth::AuthApi;
pub use exercise::ExerciseApi;
pub use export::{ExportApi, ExportPayload};
pub use plan::PlanApi;
pub use video::{VideoApi, VideoFile};
