// src/analyze/mod.rs
//! Scoring pipeline entry: tokenize once, run the three confidence
//! strategies and the sentiment scorer, and collect timing metrics.
//!
//! Everything here is pure and synchronous; callers may score concurrently.

pub mod debug;
pub mod scoring;
pub mod timing;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::sentiment::{SentimentAnalyzer, SentimentResult};
use crate::tokenize::{char_len, tokenize};

// Re-export convenient types.
pub use crate::analyze::scoring::{derived_time_secs, ConfidenceAlgorithm, ScoreInputs};
pub use crate::analyze::timing::TimingMetrics;

/// The three confidence opinions, side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceScores {
    pub vocabulary_speed_length: f64,
    pub speed_complexity: f64,
    pub vocabulary_speed: f64,
}

impl ConfidenceScores {
    pub fn from_inputs(inputs: &ScoreInputs) -> Self {
        Self {
            vocabulary_speed_length: ConfidenceAlgorithm::VocabularySpeedLength.score(inputs),
            speed_complexity: ConfidenceAlgorithm::SpeedComplexity.score(inputs),
            vocabulary_speed: ConfidenceAlgorithm::VocabularySpeed.score(inputs),
        }
    }

    pub fn get(&self, alg: ConfidenceAlgorithm) -> f64 {
        match alg {
            ConfidenceAlgorithm::VocabularySpeedLength => self.vocabulary_speed_length,
            ConfidenceAlgorithm::SpeedComplexity => self.speed_complexity,
            ConfidenceAlgorithm::VocabularySpeed => self.vocabulary_speed,
        }
    }

    /// (algorithm, score) pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (ConfidenceAlgorithm, f64)> + '_ {
        ConfidenceAlgorithm::ALL.into_iter().map(|a| (a, self.get(a)))
    }
}

/// Everything computed from one transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerScores {
    pub confidence: ConfidenceScores,
    pub sentiment: SentimentResult,
    pub timing: TimingMetrics,
}

/// Score a transcript against a caller-supplied elapsed time.
pub fn score_answer(transcript: &str, elapsed_secs: f64) -> AnswerScores {
    let tokens = tokenize(transcript);
    let transcript_chars = char_len(transcript);
    let inputs = ScoreInputs::from_tokens(&tokens, transcript_chars, elapsed_secs);

    let confidence = ConfidenceScores::from_inputs(&inputs);
    let sentiment = SentimentAnalyzer::new().score_tokens(&tokens);
    let timing = TimingMetrics::from_inputs(&inputs);

    tracing::debug!(
        target: "scoring",
        id = %anon_id(transcript),
        words = inputs.word_count,
        fillers = inputs.filler_count,
        c1 = confidence.vocabulary_speed_length,
        c2 = confidence.speed_complexity,
        c3 = confidence.vocabulary_speed,
        sentiment = sentiment.score,
        "scored answer"
    );

    AnswerScores {
        confidence,
        sentiment,
        timing,
    }
}

/// Score using the duration derived from transcript length, as hosts
/// without a measured duration do.
pub fn score_answer_derived(transcript: &str) -> AnswerScores {
    score_answer(transcript, derived_time_secs(transcript))
}

/// Short SHA-256 prefix identifying a transcript in logs without its text.
pub fn anon_id(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
