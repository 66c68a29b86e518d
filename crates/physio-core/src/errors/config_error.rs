use crate::language::Language;

/// Fatal errors raised while building or validating an
/// [`EngineConfiguration`](crate::config::EngineConfiguration).
///
/// These abort before any record is processed; a broken ruleset must never
/// score a batch.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing RuleSet for supported language '{language}'")]
    MissingRuleSet { language: Language },

    #[error("alias '{alias}' maps to both '{first}' and '{second}' in language '{language}'")]
    AmbiguousAlias {
        language: Language,
        alias: String,
        first: String,
        second: String,
    },

    #[error("invalid normalization rule '{pattern}': {reason}")]
    InvalidRewriteRule { pattern: String, reason: String },

    #[error("invalid rule value in '{rule}': {reason}")]
    InvalidRuleValue { rule: String, reason: String },

    #[error(
        "thresholds for '{language}' are not ordered: high {high} >= medium {medium} >= low {low} >= rejection {rejection} required"
    )]
    UnorderedThresholds {
        language: Language,
        high: f64,
        medium: f64,
        low: f64,
        rejection: f64,
    },

    #[error("vocabulary term '{term}' has non-finite or negative weight {weight}")]
    InvalidTermWeight { term: String, weight: f64 },
}
