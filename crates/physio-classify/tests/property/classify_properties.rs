//! Property tests for the classification pipeline.

use std::sync::Arc;

use proptest::prelude::*;

use physio_classify::{ClassificationEngine, FilterOptions};
use physio_core::constants::{CONFIDENCE_CEILING, CONFIDENCE_FLOOR};
use physio_core::rules::{BlockerGroup, RuleSet};
use physio_core::{BatchOutcome, EngineConfiguration, Language, Record, VocabTerm};

fn engine() -> ClassificationEngine {
    let mut english = RuleSet::empty();
    english.blockers = vec![BlockerGroup {
        category: "diagnostic imaging".into(),
        terms: vec!["mri scanner".into()],
    }];
    let config = EngineConfiguration::builder()
        .ruleset(Language::English, english)
        .ruleset(Language::Arabic, RuleSet::empty())
        .vocabulary(vec![
            VocabTerm::new("treadmill", 30.0, "exercise", "pt", Language::English),
            VocabTerm::new("tens", 35.0, "electrotherapy", "pt", Language::English),
            VocabTerm::new("علاج", 20.0, "therapy", "pt", Language::Arabic),
        ])
        .build()
        .unwrap();
    ClassificationEngine::new(Arc::new(config)).unwrap()
}

fn name_strategy() -> impl Strategy<Value = String> {
    // Letters, digits, hyphens, and a slice of the Arabic block, with at
    // least one alphabetic character so validation passes.
    "[a-z][a-z0-9 \\-\\x{0621}-\\x{063A}]{0,40}"
}

proptest! {
    #[test]
    fn classification_is_deterministic(name in name_strategy()) {
        let engine = engine();
        let record = Record::new("p-1", &name);
        let first = engine.classify(&record).unwrap();
        let second = engine.classify(&record).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn confidence_stays_within_bounds(name in name_strategy()) {
        let engine = engine();
        let result = engine.classify(&Record::new("p-2", &name)).unwrap();
        prop_assert!(result.confidence >= CONFIDENCE_FLOOR);
        prop_assert!(result.confidence <= CONFIDENCE_CEILING);
    }

    #[test]
    fn blocker_dominates_any_suffix(suffix in "[a-z ]{0,30}") {
        let engine = engine();
        let name = format!("mri scanner tens treadmill {suffix}");
        let result = engine.classify(&Record::new("p-3", &name)).unwrap();
        prop_assert!(!result.accepted);
        prop_assert_eq!(result.confidence, 0.0);
        prop_assert_eq!(result.explanations.len(), 1);
    }

    #[test]
    fn extra_vocabulary_never_lowers_the_vocab_score(name in name_strategy()) {
        let engine = engine();
        let base = engine.classify(&Record::new("p-4", &name)).unwrap();
        prop_assume!(base.breakdown.blocker == 0.0);
        let widened = engine
            .classify(&Record::new("p-4", &format!("{name} treadmill")))
            .unwrap();
        prop_assert!(widened.breakdown.vocabulary >= base.breakdown.vocabulary);
    }

    #[test]
    fn batch_preserves_order_and_ids(names in proptest::collection::vec(name_strategy(), 0..8)) {
        let engine = engine();
        let records: Vec<Record> = names
            .iter()
            .enumerate()
            .map(|(i, name)| Record::new(format!("p-{i}"), name))
            .collect();
        let outcomes = engine.classify_batch(&records);
        prop_assert_eq!(outcomes.len(), records.len());
        for (i, outcome) in outcomes.iter().enumerate() {
            match outcome {
                BatchOutcome::Classified(result) => {
                    prop_assert_eq!(result.record_id.as_str(), records[i].id.as_str());
                }
                BatchOutcome::Skipped { id, .. } => {
                    prop_assert_eq!(id.as_str(), records[i].id.as_str());
                }
            }
        }
    }

    #[test]
    fn filtering_facets_sequentially_equals_filtering_jointly(
        names in proptest::collection::vec(name_strategy(), 0..8),
        min in 0.0f64..50.0,
    ) {
        let engine = engine();
        let results: Vec<_> = names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| engine.classify(&Record::new(format!("p-{i}"), name)).ok())
            .collect();

        let joint = engine.filter(
            &results,
            &FilterOptions {
                categories: Some(vec!["exercise".into()]),
                min_score: Some(min),
                ..Default::default()
            },
        );
        let by_category = engine.filter(
            &results,
            &FilterOptions {
                categories: Some(vec!["exercise".into()]),
                ..Default::default()
            },
        );
        let sequential = engine.filter(
            &by_category,
            &FilterOptions {
                min_score: Some(min),
                ..Default::default()
            },
        );
        prop_assert_eq!(joint, sequential);
    }
}
