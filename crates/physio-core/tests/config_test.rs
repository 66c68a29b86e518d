use physio_core::errors::ConfigError;
use physio_core::rules::{ConfidenceThresholds, CooccurrenceRule, DemotionRule, RuleSet};
use physio_core::vocab::{SynonymEntry, VocabTerm};
use physio_core::{EngineConfiguration, Language};

fn minimal_builder() -> physio_core::EngineConfigurationBuilder {
    EngineConfiguration::builder()
        .ruleset(Language::Arabic, RuleSet::empty())
        .ruleset(Language::English, RuleSet::empty())
}

#[test]
fn build_requires_both_supported_rulesets() {
    let err = EngineConfiguration::builder()
        .ruleset(Language::English, RuleSet::empty())
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingRuleSet {
            language: Language::Arabic
        }
    ));
}

#[test]
fn minimal_configuration_builds() {
    let config = minimal_builder().build().unwrap();
    assert!(config.vocabulary().is_empty());
    assert!(config.brands().is_none());
    assert!(config.code_mappings().is_none());
}

#[test]
fn ambiguous_alias_is_rejected() {
    let err = minimal_builder()
        .synonyms(
            Language::English,
            vec![
                SynonymEntry {
                    canonical: "ultrasound".into(),
                    aliases: vec!["us".into()],
                    weight: 30.0,
                },
                SynonymEntry {
                    canonical: "united states".into(),
                    aliases: vec!["us".into()],
                    weight: 1.0,
                },
            ],
        )
        .build()
        .unwrap_err();
    match err {
        ConfigError::AmbiguousAlias { alias, .. } => assert_eq!(alias, "us"),
        other => panic!("expected AmbiguousAlias, got {other:?}"),
    }
}

#[test]
fn duplicate_alias_for_same_canonical_is_fine() {
    let config = minimal_builder()
        .synonyms(
            Language::English,
            vec![
                SynonymEntry {
                    canonical: "tens".into(),
                    aliases: vec!["tens unit".into()],
                    weight: 30.0,
                },
                SynonymEntry {
                    canonical: "tens".into(),
                    aliases: vec!["tens unit".into(), "nerve stimulator".into()],
                    weight: 30.0,
                },
            ],
        )
        .build()
        .unwrap();
    let table = config.alias_table(Language::English);
    assert_eq!(table.get("tens unit").map(String::as_str), Some("tens"));
    assert_eq!(
        table.get("nerve stimulator").map(String::as_str),
        Some("tens")
    );
}

#[test]
fn positive_demotion_penalty_is_rejected() {
    let mut rules = RuleSet::empty();
    rules.demotions.push(DemotionRule {
        term: "toy".into(),
        penalty: 10.0,
    });
    let err = EngineConfiguration::builder()
        .ruleset(Language::Arabic, RuleSet::empty())
        .ruleset(Language::English, rules)
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRuleValue { .. }));
}

#[test]
fn negative_cooccurrence_boost_is_rejected() {
    let mut rules = RuleSet::empty();
    rules.cooccurrence.push(CooccurrenceRule {
        terms: vec!["ultrasound".into(), "tens".into()],
        boost: -5.0,
    });
    let err = EngineConfiguration::builder()
        .ruleset(Language::Arabic, RuleSet::empty())
        .ruleset(Language::English, rules)
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRuleValue { .. }));
}

#[test]
fn unordered_thresholds_are_rejected() {
    let mut rules = RuleSet::empty();
    rules.thresholds = Some(ConfidenceThresholds {
        high: 40.0,
        medium: 60.0,
        low: 20.0,
        rejection: 10.0,
    });
    let err = EngineConfiguration::builder()
        .ruleset(Language::Arabic, RuleSet::empty())
        .ruleset(Language::English, rules)
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnorderedThresholds { .. }));
}

#[test]
fn non_finite_term_weight_is_rejected() {
    let err = minimal_builder()
        .term(VocabTerm::new(
            "ultrasound",
            f64::NAN,
            "modality",
            "pt",
            Language::English,
        ))
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTermWeight { .. }));
}

#[test]
fn deserialization_runs_builder_validation() {
    // Only an English ruleset: must fail the same way the builder does,
    // not produce a value that panics later.
    let err = serde_json::from_str::<EngineConfiguration>(r#"{"rulesets":{"en":{}}}"#)
        .unwrap_err();
    assert!(err.to_string().contains("missing RuleSet"));

    let config: EngineConfiguration =
        serde_json::from_str(r#"{"rulesets":{"en":{},"ar":{}}}"#).unwrap();
    // Every supported language resolves without panicking.
    for language in Language::supported() {
        let _ = config.ruleset(language);
    }
}

#[test]
fn configuration_round_trips_through_json() {
    let config = minimal_builder()
        .term(VocabTerm::new(
            "ultrasound",
            40.0,
            "modality",
            "pt",
            Language::English,
        ))
        .build()
        .unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let back: EngineConfiguration = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}
