// src/lib.rs
// Public library surface for the service binary, the demo, and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod face;
pub mod feedback;
pub mod lexicon;
pub mod metrics;
pub mod questions;
pub mod report;
pub mod sentiment;
pub mod tokenize;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{score_answer, AnswerScores, ConfidenceAlgorithm, ConfidenceScores};
pub use crate::api::{router, AppState};
pub use crate::report::{assemble, generate_report, Report, ReportInput};
pub use crate::sentiment::{SentimentLabel, SentimentResult};

use tower_http::cors::CorsLayer;
use tracing::info;

/// Full in-process application: API routes, `/metrics`, and (with
/// `DEBUG_ROUTES=1`) the scoring debug routes.
pub async fn app() -> anyhow::Result<axum::Router> {
    let state = AppState::from_env();
    let metrics = crate::metrics::Metrics::init()?;

    let mut router = api::router(state).merge(metrics.router());

    if std::env::var("DEBUG_ROUTES").ok().as_deref() == Some("1") {
        router = router.merge(analyze::debug::router());
        info!(target: "api", "debug routes enabled");
    }

    Ok(router.layer(CorsLayer::very_permissive()))
}
