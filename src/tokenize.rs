//! Whitespace tokenizer shared by every scorer.
//!
//! Tokens keep their original casing and punctuation; scorers lowercase on
//! lookup. An empty or whitespace-only transcript yields zero tokens.

/// Split a transcript on runs of whitespace (after trimming).
pub fn tokenize(transcript: &str) -> Vec<&str> {
    transcript.split_whitespace().collect()
}

/// Token length in characters (not bytes).
#[inline]
pub fn char_len(token: &str) -> usize {
    token.chars().count()
}

/// Tokens longer than this many characters count as "long words".
pub const LONG_WORD_MIN_EXCLUSIVE: usize = 6;

#[inline]
pub fn is_long_word(token: &str) -> bool {
    char_len(token) > LONG_WORD_MIN_EXCLUSIVE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_yield_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n ").is_empty());
    }

    #[test]
    fn splits_on_whitespace_runs() {
        let t = tokenize("  I   built\tthe\nAPI  ");
        assert_eq!(t, vec!["I", "built", "the", "API"]);
    }

    #[test]
    fn long_word_counts_characters() {
        assert!(!is_long_word("sixsix"));
        assert!(is_long_word("seven77"));
        // 7 chars, 8+ bytes
        assert!(is_long_word("résumés"));
        assert_eq!(char_len("résumé"), 6);
    }
}
