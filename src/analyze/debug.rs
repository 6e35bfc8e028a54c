//! Debug endpoints: inspect the word tables and the intermediate terms behind
//! a score. Mounted by `app()` only when `DEBUG_ROUTES=1`.

use axum::{extract::Query, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use super::scoring::{derived_time_secs, ConfidenceAlgorithm, ScoreInputs};
use crate::lexicon::{lexicon_len, FILLER_WORDS};
use crate::sentiment::SentimentAnalyzer;
use crate::tokenize::tokenize;

#[derive(Debug, Serialize)]
pub struct LexiconOut {
    pub filler_words: Vec<&'static str>,
    pub sentiment_entries: usize,
}

#[derive(Debug, Deserialize)]
pub struct BreakdownQuery {
    pub text: String,
    pub elapsed: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AlgorithmOut {
    pub algorithm: ConfidenceAlgorithm,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct BreakdownOut {
    pub word_count: usize,
    pub long_word_count: usize,
    pub filler_count: usize,
    pub elapsed_secs: f64,
    pub derived_time_secs: f64,
    pub words_per_second: f64,
    pub long_word_ratio: f64,
    pub mean_token_len: f64,
    pub sentiment_raw: i32,
    pub sentiment_hits: usize,
    pub scores: Vec<AlgorithmOut>,
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/debug/lexicon", get(get_lexicon))
        .route("/debug/breakdown", get(get_breakdown))
}

async fn get_lexicon() -> Json<LexiconOut> {
    Json(LexiconOut {
        filler_words: FILLER_WORDS.to_vec(),
        sentiment_entries: lexicon_len(),
    })
}

async fn get_breakdown(Query(q): Query<BreakdownQuery>) -> Json<BreakdownOut> {
    Json(breakdown(&q.text, q.elapsed))
}

/// Intermediate terms for one transcript; `elapsed` defaults to derived time.
pub fn breakdown(text: &str, elapsed: Option<f64>) -> BreakdownOut {
    let elapsed = elapsed.unwrap_or_else(|| derived_time_secs(text));
    let inputs = ScoreInputs::new(text, elapsed);
    let (sentiment_raw, sentiment_hits) = SentimentAnalyzer::new().raw_score(&tokenize(text));

    BreakdownOut {
        word_count: inputs.word_count,
        long_word_count: inputs.long_word_count,
        filler_count: inputs.filler_count,
        elapsed_secs: inputs.elapsed_secs,
        derived_time_secs: inputs.derived_time_secs(),
        words_per_second: inputs.words_per_second(),
        long_word_ratio: inputs.long_word_ratio(),
        mean_token_len: inputs.mean_token_len(),
        sentiment_raw,
        sentiment_hits,
        scores: ConfidenceAlgorithm::ALL
            .into_iter()
            .map(|algorithm| AlgorithmOut {
                algorithm,
                score: algorithm.score(&inputs),
            })
            .collect(),
    }
}
