//! paceline-http - HTTP client for the running-analysis backend.
//!
//! [`ApiClient`] sends every request through one path that attaches the
//! session's bearer token and turns a 401 into a session teardown plus a
//! login redirect. Endpoints are grouped by area:
//!
//! ```no_run
//! use paceline_core::{ApiUrl, Credentials, MemoryStore, Session};
//! use paceline_http::ApiClient;
//!
//! # async fn example() -> paceline_core::Result<()> {
//! let session = Session::restore(MemoryStore::new())?;
//! let client = ApiClient::builder(ApiUrl::new("http://localhost:8000")?)
//!     .session(session.clone())
//!     .build()?;
//!
//! client.auth().login(&Credentials::phone("13800138000", "secret")).await?;
//! let stats = client.exercise().statistics(None).await?;
//! println!("{} samples", stats.dates.len());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod endpoints;

pub use client::{ApiClient, ApiClientBuilder};
pub use endpoints::{AuthApi, ExerciseApi, ExportApi, ExportPayload, PlanApi, VideoApi, VideoFile};
