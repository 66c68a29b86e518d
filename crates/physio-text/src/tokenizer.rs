//! Token extraction with stopword filtering and synonym canonicalization.
//!
//! The tokenizer is an immutable value built from one language's tables;
//! reconfiguring means building a new tokenizer and swapping the
//! configuration reference, so calls already in flight are unaffected.

use std::collections::{BTreeSet, HashMap, HashSet};

use physio_core::constants::MIN_TOKEN_CHARS;
use physio_core::Language;

use crate::stopwords;

/// Splits normalized text into significant tokens, dropping stopwords and
/// rewriting aliases to their canonical forms.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: HashSet<String>,
    aliases: HashMap<String, String>,
}

impl Tokenizer {
    /// Build for one language: built-in stopword list plus configured
    /// additions, and the language's alias → canonical table.
    pub fn new(
        language: Language,
        extra_stopwords: &[String],
        aliases: HashMap<String, String>,
    ) -> Self {
        let mut set: HashSet<String> = stopwords::builtin(language)
            .into_iter()
            .map(str::to_string)
            .collect();
        set.extend(extra_stopwords.iter().cloned());
        Self {
            stopwords: set,
            aliases,
        }
    }

    /// Surviving tokens in text order, duplicates kept. Input is expected to
    /// be normalized already.
    pub fn token_stream(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '-')
            .map(|t| t.trim_matches('-'))
            .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
            .filter(|t| !self.stopwords.contains(*t))
            .map(|t| self.canonical(t).unwrap_or(t).to_string())
            .collect()
    }

    /// Deduplicated token set with stable (sorted) iteration order, which
    /// keeps downstream vocabulary matching deterministic.
    pub fn tokenize(&self, text: &str) -> BTreeSet<String> {
        self.token_stream(text).into_iter().collect()
    }

    /// Canonical form of a token or phrase, if it is a known alias.
    pub fn canonical(&self, term: &str) -> Option<&str> {
        self.aliases.get(term).map(String::as_str)
    }

    /// Contiguous sliding windows of `n` tokens, joined with single spaces.
    /// Empty when `n` is zero or exceeds the stream length.
    pub fn n_grams(tokens: &[String], n: usize) -> Vec<String> {
        if n == 0 || tokens.len() < n {
            return Vec::new();
        }
        tokens.windows(n).map(|w| w.join(" ")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(language: Language) -> Tokenizer {
        Tokenizer::new(language, &[], HashMap::new())
    }

    #[test]
    fn splits_and_drops_stopwords() {
        let t = plain(Language::English);
        let tokens = t.tokenize("ultrasound unit with tens electrode");
        assert!(tokens.contains("ultrasound"));
        assert!(tokens.contains("tens"));
        assert!(!tokens.contains("with"));
    }

    #[test]
    fn deduplicates() {
        let t = plain(Language::English);
        let tokens = t.tokenize("tens tens tens");
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn aliases_rewrite_to_canonical() {
        let aliases = HashMap::from([("stim".to_string(), "stimulator".to_string())]);
        let t = Tokenizer::new(Language::English, &[], aliases);
        let tokens = t.tokenize("muscle stim");
        assert!(tokens.contains("stimulator"));
        assert!(!tokens.contains("stim"));
    }

    #[test]
    fn extra_stopwords_are_honored() {
        let extra = vec!["qty".to_string()];
        let t = Tokenizer::new(Language::English, &extra, HashMap::new());
        assert!(!t.tokenize("qty 12 units").contains("qty"));
    }

    #[test]
    fn splits_mixed_arabic_latin_runs() {
        let t = plain(Language::Mixed);
        let tokens = t.tokenize("جهاز tens كهربائي");
        assert!(tokens.contains("جهاز"));
        assert!(tokens.contains("tens"));
        assert!(tokens.contains("كهربائي"));
    }

    #[test]
    fn short_tokens_are_dropped() {
        let t = plain(Language::English);
        assert!(t.tokenize("x ray").contains("ray"));
        assert_eq!(t.tokenize("x y z").len(), 0);
    }

    #[test]
    fn n_grams_slide_in_order() {
        let tokens: Vec<String> = ["therapeutic", "ultrasound", "unit"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            Tokenizer::n_grams(&tokens, 2),
            vec!["therapeutic ultrasound", "ultrasound unit"]
        );
        assert_eq!(Tokenizer::n_grams(&tokens, 3).len(), 1);
        assert!(Tokenizer::n_grams(&tokens, 4).is_empty());
        assert!(Tokenizer::n_grams(&tokens, 0).is_empty());
    }
}
