use proptest::prelude::*;

use physio_core::{Language, VocabTerm};
use physio_lexicon::Lexicon;

fn term(name: &str, weight: f64) -> VocabTerm {
    VocabTerm::new(name, weight, "modality", "pt", Language::English)
}

/// Reference edit distance, for checking the trie's bounded search.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut next = vec![i + 1];
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            next.push((next[j] + 1).min(row[j + 1] + 1).min(row[j] + cost));
        }
        row = next;
    }
    row[b.len()]
}

proptest! {
    /// Every inserted term is found exactly, with the last-written value.
    #[test]
    fn inserted_terms_are_found(
        entries in prop::collection::hash_map("[a-z\\x{0621}-\\x{064A}]{1,12}", 0.0f64..100.0, 0..40)
    ) {
        let mut lex = Lexicon::new();
        for (name, weight) in &entries {
            lex.insert(name, term(name, *weight));
        }
        prop_assert_eq!(lex.term_count(), entries.len());
        for (name, weight) in &entries {
            let found = lex.lookup_exact(name);
            prop_assert!(found.is_some());
            prop_assert_eq!(found.unwrap().weight, *weight);
        }
    }

    /// Terms never inserted are never found.
    #[test]
    fn absent_terms_are_absent(
        present in prop::collection::hash_set("[a-m]{1,8}", 0..20),
        probe in "[n-z]{1,8}"
    ) {
        let mut lex = Lexicon::new();
        for name in &present {
            lex.insert(name, term(name, 1.0));
        }
        prop_assert!(lex.lookup_exact(&probe).is_none());
    }

    /// serialize/deserialize round-trips exact lookups for every term.
    #[test]
    fn round_trip_preserves_lookups(
        entries in prop::collection::hash_map("[a-z]{1,10}", 0.0f64..100.0, 0..30)
    ) {
        let mut lex = Lexicon::new();
        for (name, weight) in &entries {
            lex.insert(name, term(name, *weight));
        }
        let restored = Lexicon::from_bytes(&lex.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(&lex, &restored);
        for name in entries.keys() {
            prop_assert_eq!(lex.lookup_exact(name), restored.lookup_exact(name));
        }
    }

    /// Fuzzy lookup never returns a term whose true edit distance exceeds
    /// the requested budget, and reports distances faithfully.
    #[test]
    fn fuzzy_respects_distance_bound(
        names in prop::collection::hash_set("[a-e]{1,8}", 1..25),
        query in "[a-e]{1,8}",
        budget in 0usize..3
    ) {
        let mut lex = Lexicon::new();
        for name in &names {
            lex.insert(name, term(name, 1.0));
        }
        for hit in lex.lookup_fuzzy(&query, budget, 100) {
            let true_distance = levenshtein(&query, &hit.term.term);
            prop_assert!(true_distance <= budget);
            prop_assert_eq!(hit.distance, true_distance);
        }
    }

    /// Prefix lookup returns exactly the terms starting with the prefix
    /// (when no limit pressure applies).
    #[test]
    fn prefix_lookup_is_complete(
        names in prop::collection::hash_set("[a-c]{1,6}", 0..25),
        prefix in "[a-c]{0,3}"
    ) {
        let mut lex = Lexicon::new();
        for name in &names {
            lex.insert(name, term(name, 1.0));
        }
        let hits: Vec<String> = lex
            .lookup_prefix(&prefix, usize::MAX)
            .into_iter()
            .map(|t| t.term.clone())
            .collect();
        let expected: usize = names.iter().filter(|n| n.starts_with(&prefix)).count();
        prop_assert_eq!(hits.len(), expected);
        for hit in &hits {
            prop_assert!(hit.starts_with(&prefix));
        }
    }
}
