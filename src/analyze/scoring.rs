//! Confidence heuristics over transcript tokens and timing.
//!
//! Three independently weighted formulas, reported side by side:
//! - `VocabularySpeedLength`: word count, long-word ratio, speed, mean word
//!   length, filler penalty (5 each) and a penalty for answers whose
//!   derived duration exceeds 60s.
//! - `SpeedComplexity`: speed, mean word length, filler penalty (10 each).
//! - `VocabularySpeed`: long-word ratio, speed, filler penalty (20 each).
//!
//! Every score is capped at 100, rounded to 2 decimals, floored at 0.
//! A transcript without tokens scores 0 under all three.

use serde::{Deserialize, Serialize};

use crate::lexicon::is_filler;
use crate::tokenize::{char_len, is_long_word, tokenize};

pub const CONFIDENCE_MIN: f64 = 0.0;
pub const CONFIDENCE_MAX: f64 = 100.0;

/// Derived answers longer than this (seconds) lose one point per extra second.
const TIME_PENALTY_AFTER_SECS: f64 = 60.0;

/// Characters per second used to derive a duration from transcript length.
pub const CHARS_PER_SECOND: f64 = 4.0;

/// Duration estimated from transcript length alone (`chars / 4`).
pub fn derived_time_secs(transcript: &str) -> f64 {
    char_len(transcript) as f64 / CHARS_PER_SECOND
}

/// Token statistics shared by the three formulas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreInputs {
    pub word_count: usize,
    pub long_word_count: usize,
    pub filler_count: usize,
    /// Sum of token lengths in characters.
    pub token_chars: usize,
    /// Length of the untrimmed transcript in characters.
    pub transcript_chars: usize,
    /// Caller-supplied elapsed time.
    pub elapsed_secs: f64,
}

impl ScoreInputs {
    pub fn new(transcript: &str, elapsed_secs: f64) -> Self {
        let tokens = tokenize(transcript);
        Self::from_tokens(&tokens, char_len(transcript), elapsed_secs)
    }

    pub fn from_tokens(tokens: &[&str], transcript_chars: usize, elapsed_secs: f64) -> Self {
        Self {
            word_count: tokens.len(),
            long_word_count: tokens.iter().filter(|t| is_long_word(t)).count(),
            filler_count: tokens.iter().filter(|t| is_filler(t)).count(),
            token_chars: tokens.iter().map(|t| char_len(t)).sum(),
            transcript_chars,
            elapsed_secs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Words per second; 0 when elapsed time is not a positive finite
    /// number or the quotient overflows (subnormal elapsed times).
    pub fn words_per_second(&self) -> f64 {
        if !(self.elapsed_secs > 0.0 && self.elapsed_secs.is_finite()) {
            return 0.0;
        }
        let wps = self.word_count as f64 / self.elapsed_secs;
        if wps.is_finite() {
            wps
        } else {
            0.0
        }
    }

    /// Share of long words, scaled to 0–100.
    pub fn long_word_ratio(&self) -> f64 {
        if self.word_count == 0 {
            return 0.0;
        }
        self.long_word_count as f64 / self.word_count as f64 * 100.0
    }

    /// Mean token length in characters.
    pub fn mean_token_len(&self) -> f64 {
        if self.word_count == 0 {
            return 0.0;
        }
        self.token_chars as f64 / self.word_count as f64
    }

    pub fn derived_time_secs(&self) -> f64 {
        self.transcript_chars as f64 / CHARS_PER_SECOND
    }
}

/// The three confidence strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceAlgorithm {
    VocabularySpeedLength,
    SpeedComplexity,
    VocabularySpeed,
}

impl ConfidenceAlgorithm {
    pub const ALL: [ConfidenceAlgorithm; 3] = [
        ConfidenceAlgorithm::VocabularySpeedLength,
        ConfidenceAlgorithm::SpeedComplexity,
        ConfidenceAlgorithm::VocabularySpeed,
    ];

    /// Stable key for metrics labels and JSON.
    pub fn key(&self) -> &'static str {
        match self {
            Self::VocabularySpeedLength => "vocabulary_speed_length",
            Self::SpeedComplexity => "speed_complexity",
            Self::VocabularySpeed => "vocabulary_speed",
        }
    }

    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::VocabularySpeedLength => "Vocabulary, Speed & Length Confidence Score",
            Self::SpeedComplexity => "Speed & Complexity Confidence Score",
            Self::VocabularySpeed => "Vocabulary & Speed Confidence Score",
        }
    }

    pub fn score(&self, inputs: &ScoreInputs) -> f64 {
        if inputs.is_empty() {
            return 0.0;
        }
        let raw = match self {
            Self::VocabularySpeedLength => vocabulary_speed_length_raw(inputs),
            Self::SpeedComplexity => speed_complexity_raw(inputs),
            Self::VocabularySpeed => vocabulary_speed_raw(inputs),
        };
        finish(raw)
    }
}

fn vocabulary_speed_length_raw(i: &ScoreInputs) -> f64 {
    let speed_score = (i.words_per_second() / 2.0 * 100.0).min(100.0);
    let hesitation_penalty = i.filler_count as f64 * 5.0;
    let word_length_score = (i.mean_token_len() * 10.0).min(100.0);
    let time_penalty = (i.derived_time_secs() - TIME_PENALTY_AFTER_SECS).max(0.0);

    i.word_count as f64 * 2.0 + i.long_word_ratio() + speed_score + word_length_score
        - hesitation_penalty
        - time_penalty
}

fn speed_complexity_raw(i: &ScoreInputs) -> f64 {
    let hesitation_penalty = i.filler_count as f64 * 10.0;
    let speed_score = (i.words_per_second() * 50.0).min(100.0);
    let word_complexity_score = (i.mean_token_len() * 15.0).min(100.0);

    speed_score + word_complexity_score - hesitation_penalty
}

fn vocabulary_speed_raw(i: &ScoreInputs) -> f64 {
    let speed_factor = (i.words_per_second() * 40.0).min(100.0);
    let hesitation_penalty = i.filler_count as f64 * 20.0;

    i.long_word_ratio() + speed_factor - hesitation_penalty
}

/// Cap at 100, round to 2 decimals, then floor at 0.
fn finish(raw: f64) -> f64 {
    if !raw.is_finite() {
        return CONFIDENCE_MIN;
    }
    round2(raw.min(CONFIDENCE_MAX)).max(CONFIDENCE_MIN)
}

/// Round half away from zero to 2 decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Convenience wrappers named after the strategies.
pub fn vocabulary_speed_length(inputs: &ScoreInputs) -> f64 {
    ConfidenceAlgorithm::VocabularySpeedLength.score(inputs)
}

pub fn speed_complexity(inputs: &ScoreInputs) -> f64 {
    ConfidenceAlgorithm::SpeedComplexity.score(inputs)
}

pub fn vocabulary_speed(inputs: &ScoreInputs) -> f64 {
    ConfidenceAlgorithm::VocabularySpeed.score(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn inputs_count_tokens() {
        let i = ScoreInputs::new("Um I like structured answers", 5.0);
        assert_eq!(i.word_count, 5);
        assert_eq!(i.filler_count, 2);
        assert_eq!(i.long_word_count, 2);
        assert!(approx(i.words_per_second(), 1.0));
        assert!(approx(i.long_word_ratio(), 40.0));
    }

    #[test]
    fn zero_elapsed_means_zero_speed() {
        let i = ScoreInputs::new("one two three", 0.0);
        assert_eq!(i.words_per_second(), 0.0);
        let i = ScoreInputs::new("one two three", -4.0);
        assert_eq!(i.words_per_second(), 0.0);
        let i = ScoreInputs::new("one two three", f64::INFINITY);
        assert_eq!(i.words_per_second(), 0.0);
    }

    #[test]
    fn subnormal_elapsed_does_not_overflow_speed() {
        let i = ScoreInputs::new("good great excellent", 1e-320);
        assert_eq!(i.words_per_second(), 0.0);
        for alg in ConfidenceAlgorithm::ALL {
            assert!(alg.score(&i).is_finite(), "{alg:?}");
        }
    }

    #[test]
    fn empty_scores_zero() {
        let i = ScoreInputs::new("   ", 3.0);
        for alg in ConfidenceAlgorithm::ALL {
            assert_eq!(alg.score(&i), 0.0, "{:?}", alg);
        }
    }

    #[test]
    fn filler_only_answer() {
        // tokens 2+2+4 chars → mean 8/3
        let i = ScoreInputs::new("um uh like", 2.0);
        // 6 + 0 + 75 + 26.666 - 15 - 0
        assert!(approx(vocabulary_speed_length(&i), 92.67));
        // 75 + 40 - 30
        assert!(approx(speed_complexity(&i), 85.0));
        // 0 + 60 - 60
        assert!(approx(vocabulary_speed(&i), 0.0));
    }

    #[test]
    fn good_great_excellent() {
        let i = ScoreInputs::new("good great excellent", 3.0);
        // 6 + 33.33 + 50 + 60 → capped
        assert_eq!(vocabulary_speed_length(&i), 100.0);
        // 50 + 90 → capped
        assert_eq!(speed_complexity(&i), 100.0);
        // 33.333 + 40
        assert!(approx(vocabulary_speed(&i), 73.33));
    }

    #[test]
    fn long_derived_time_is_penalized() {
        // 70 words of 3 chars + spaces → 279 chars → derived 69.75s → penalty 9.75
        let text = vec!["abc"; 70].join(" ");
        let i = ScoreInputs::new(&text, 1000.0);
        assert!(approx(i.derived_time_secs(), 69.75));
        // 140 + 0 + 3.5 + 30 - 0 - 9.75 → capped at 100 anyway
        assert_eq!(vocabulary_speed_length(&i), 100.0);

        // Short answer padded with trailing spaces: only the penalty differs
        let padded = format!("abc{}", " ".repeat(400));
        let i = ScoreInputs::new(&padded, 1.0);
        // 2 + 0 + 50 + 30 - 0 - (403/4 - 60 = 40.75) = 41.25
        assert!(approx(vocabulary_speed_length(&i), 41.25));
    }

    #[test]
    fn rounding_is_two_decimals() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(26.666_666), 26.67);
        assert_eq!(round2(-0.004), -0.0);
    }

    #[test]
    fn non_finite_raw_floors_to_zero() {
        assert_eq!(finish(f64::NAN), 0.0);
        assert_eq!(finish(f64::NEG_INFINITY), 0.0);
    }
}
