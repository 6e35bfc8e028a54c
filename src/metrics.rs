use axum::{routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::analyze::AnswerScores;
use crate::lexicon::lexicon_len;

// One recorder per process; `app()` may run several times in tests.
static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (once) and publish static gauges.
    pub fn init() -> anyhow::Result<Self> {
        let handle = HANDLE
            .get_or_try_init(|| PrometheusBuilder::new().install_recorder())?
            .clone();

        gauge!("interview_lexicon_entries").set(lexicon_len() as f64);

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Record one scoring pass.
pub fn record_scores(scores: &AnswerScores) {
    counter!("interview_scores_total").increment(1);
    for (alg, value) in scores.confidence.iter() {
        histogram!("interview_confidence_score", "algorithm" => alg.key()).record(value);
    }
    histogram!("interview_sentiment_score").record(scores.sentiment.score);
}

/// Record one generated report.
pub fn record_report() {
    counter!("interview_reports_total").increment(1);
}
