//! Static word tables: hesitation markers and the sentiment lexicon.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<String, i32>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, i32>>(raw).expect("valid sentiment lexicon")
});

/// Hesitation markers penalized by the confidence heuristics.
///
/// Matching is per token, so the two-word entry only matters to callers that
/// pre-join phrases; a whitespace tokenizer never produces it.
pub const FILLER_WORDS: [&str; 4] = ["um", "uh", "like", "you know"];

/// Case-insensitive filler lookup for a single token.
pub fn is_filler(token: &str) -> bool {
    let lower = token.to_lowercase();
    FILLER_WORDS.iter().any(|f| *f == lower)
}

/// Lexicon weight for a word (case-insensitive), `None` if absent.
pub fn sentiment_weight(token: &str) -> Option<i32> {
    LEXICON.get(&token.to_lowercase()).copied()
}

/// Number of entries in the sentiment lexicon.
pub fn lexicon_len() -> usize {
    LEXICON.len()
}
