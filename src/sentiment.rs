//! Lexicon sentiment for a transcript: signed score in [-100, 100] plus label.
//!
//! Normalization maps the raw weight sum from `[-n, n]` (n = token count)
//! with `((raw + n) / 2n) * 100 - 100`. That puts `raw == n` at 0 rather
//! than +100; the arithmetic is kept as-is so scores stay comparable with
//! previously generated reports.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lexicon::sentiment_weight;
use crate::tokenize::tokenize;

pub const SENTIMENT_MIN: f64 = -100.0;
pub const SENTIMENT_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Self::Positive
        } else if score < 0.0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub score: f64,
    pub label: SentimentLabel,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            label: SentimentLabel::Neutral,
        }
    }

    fn from_score(score: f64) -> Self {
        let score = score.clamp(SENTIMENT_MIN, SENTIMENT_MAX);
        Self {
            score,
            label: SentimentLabel::from_score(score),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Returns (raw weight sum, number of lexicon hits).
    pub fn raw_score(&self, tokens: &[&str]) -> (i32, usize) {
        tokens
            .iter()
            .filter_map(|t| sentiment_weight(t))
            .fold((0, 0), |(sum, hits), w| (sum + w, hits + 1))
    }

    /// Score an already tokenized transcript.
    ///
    /// Zero tokens, or no token found in the lexicon, is Neutral (0): there
    /// is no sentiment evidence to normalize. Hits that cancel out still go
    /// through the formula, so "good bad" (raw 0) lands at -50, Negative.
    pub fn score_tokens(&self, tokens: &[&str]) -> SentimentResult {
        let (raw, hits) = self.raw_score(tokens);
        if tokens.is_empty() || hits == 0 {
            return SentimentResult::neutral();
        }

        let n = tokens.len() as f64;
        let (min_possible, max_possible) = (-n, n);
        let normalized =
            ((f64::from(raw) - min_possible) / (max_possible - min_possible)) * 100.0 - 100.0;
        SentimentResult::from_score(normalized)
    }

    pub fn score_text(&self, text: &str) -> SentimentResult {
        self.score_tokens(&tokenize(text))
    }
}
