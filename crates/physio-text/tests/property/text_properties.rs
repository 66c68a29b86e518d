use std::collections::HashMap;

use proptest::prelude::*;

use physio_core::Language;
use physio_text::{detect_language, Normalizer, Tokenizer};

proptest! {
    /// Normalization is idempotent: a canonical text is its own canonical form.
    #[test]
    fn normalize_is_idempotent(text in "[a-zA-Z0-9 \\-.,()/\\x{0600}-\\x{06FF}]{0,60}") {
        let n = Normalizer::empty();
        for language in [Language::Arabic, Language::English, Language::Mixed] {
            let once = n.normalize(&text, language);
            let twice = n.normalize(&once, language);
            prop_assert_eq!(&once, &twice);
        }
    }

    /// Normalized output never contains runs of whitespace or uppercase ASCII.
    #[test]
    fn normalize_collapses_and_lowercases(text in "\\PC{0,60}") {
        let n = Normalizer::empty();
        let out = n.normalize(&text, Language::English);
        prop_assert!(!out.contains("  "));
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
        prop_assert!(!out.chars().any(|c| c.is_ascii_uppercase()));
    }

    /// The token set is exactly the deduplicated token stream.
    #[test]
    fn token_set_matches_stream(text in "[a-z \\-]{0,60}") {
        let t = Tokenizer::new(Language::English, &[], HashMap::new());
        let stream = t.token_stream(&text);
        let set = t.tokenize(&text);
        for token in &stream {
            prop_assert!(set.contains(token));
        }
        prop_assert!(set.len() <= stream.len().max(1));
    }

    /// Sliding windows: count is len - n + 1 and each window joins n tokens.
    #[test]
    fn n_gram_count_is_exact(tokens in prop::collection::vec("[a-z]{1,8}", 0..12), n in 1usize..4) {
        let grams = Tokenizer::n_grams(&tokens, n);
        if tokens.len() >= n {
            prop_assert_eq!(grams.len(), tokens.len() - n + 1);
            for gram in &grams {
                prop_assert_eq!(gram.split(' ').count(), n);
            }
        } else {
            prop_assert!(grams.is_empty());
        }
    }

    /// Detection is total: every input maps to some language without panicking.
    #[test]
    fn detection_never_panics(text in "\\PC{0,80}") {
        let _ = detect_language(&text);
    }
}
