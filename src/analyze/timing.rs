//! Descriptive transcript metrics shown in the report.
//!
//! `elapsed_secs` is whatever the caller measured; `derived_time_secs` is
//! recomputed from transcript length. Both are kept since hosts differ on
//! which one they supply.

use serde::Serialize;

use super::scoring::ScoreInputs;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingMetrics {
    pub elapsed_secs: f64,
    pub derived_time_secs: f64,
    pub word_count: usize,
    pub long_word_count: usize,
    /// `word_count / elapsed_secs`, 0 without a positive elapsed time.
    pub words_per_second: f64,
    /// `transcript characters / word_count` (spaces included), 0 without words.
    pub average_word_length: f64,
}

impl TimingMetrics {
    pub fn from_inputs(inputs: &ScoreInputs) -> Self {
        let average_word_length = if inputs.word_count == 0 {
            0.0
        } else {
            inputs.transcript_chars as f64 / inputs.word_count as f64
        };
        Self {
            elapsed_secs: inputs.elapsed_secs,
            derived_time_secs: inputs.derived_time_secs(),
            word_count: inputs.word_count,
            long_word_count: inputs.long_word_count,
            words_per_second: inputs.words_per_second(),
            average_word_length,
        }
    }

    pub fn new(transcript: &str, elapsed_secs: f64) -> Self {
        Self::from_inputs(&ScoreInputs::new(transcript, elapsed_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_for_sample() {
        let m = TimingMetrics::new("good great excellent", 4.0);
        assert_eq!(m.word_count, 3);
        assert_eq!(m.long_word_count, 1);
        assert_eq!(m.words_per_second, 0.75);
        // 20 chars incl. spaces / 3 words
        assert!((m.average_word_length - 20.0 / 3.0).abs() < 1e-12);
        assert_eq!(m.derived_time_secs, 5.0);
        assert_eq!(m.elapsed_secs, 4.0);
    }

    #[test]
    fn zero_guards() {
        let m = TimingMetrics::new("", 0.0);
        assert_eq!(m.word_count, 0);
        assert_eq!(m.words_per_second, 0.0);
        assert_eq!(m.average_word_length, 0.0);
        assert_eq!(m.derived_time_secs, 0.0);

        let m = TimingMetrics::new("hello there", 0.0);
        assert_eq!(m.words_per_second, 0.0);
        assert!(m.average_word_length.is_finite());
    }
}
