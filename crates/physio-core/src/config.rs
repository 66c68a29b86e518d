//! Immutable engine configuration and its validating builder.
//!
//! The source of this data is an external composition step (merged rule
//! packages); the core consumes only the fully resolved value built here.
//! Built once, shared read-only; reconfiguration is a new value swapped in
//! behind an `Arc`, never an in-place mutation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::language::Language;
use crate::rules::RuleSet;
use crate::vocab::{BrandEntry, CodeMapping, SynonymEntry, VocabTerm};
use crate::weights::StageWeights;

/// The fully composed, immutable configuration consumed by the classifier.
///
/// Deserialization funnels through the builder, so a value decoded from
/// JSON has passed the same validation as one built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfiguration")]
pub struct EngineConfiguration {
    rulesets: HashMap<Language, RuleSet>,
    vocabulary: Vec<VocabTerm>,
    synonyms: HashMap<Language, Vec<SynonymEntry>>,
    brands: Option<Vec<BrandEntry>>,
    code_mappings: Option<HashMap<String, CodeMapping>>,
    weights: StageWeights,
}

impl EngineConfiguration {
    pub fn builder() -> EngineConfigurationBuilder {
        EngineConfigurationBuilder::default()
    }

    /// RuleSet for a language. Guaranteed present for every supported
    /// language by the builder; mixed-script falls back to English.
    pub fn ruleset(&self, language: Language) -> &RuleSet {
        self.rulesets
            .get(&language.ruleset_language())
            .expect("builder guarantees rulesets for supported languages")
    }

    pub fn vocabulary(&self) -> &[VocabTerm] {
        &self.vocabulary
    }

    pub fn synonyms(&self, language: Language) -> &[SynonymEntry] {
        self.synonyms
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Flat alias → canonical table for one language. Unambiguous by
    /// construction.
    pub fn alias_table(&self, language: Language) -> HashMap<String, String> {
        let mut table = HashMap::new();
        for entry in self.synonyms(language) {
            for alias in &entry.aliases {
                table.insert(alias.clone(), entry.canonical.clone());
            }
        }
        table
    }

    pub fn brands(&self) -> Option<&[BrandEntry]> {
        self.brands.as_deref()
    }

    pub fn code_mappings(&self) -> Option<&HashMap<String, CodeMapping>> {
        self.code_mappings.as_ref()
    }

    pub fn weights(&self) -> &StageWeights {
        &self.weights
    }
}

/// Validating builder. Rejects malformed configuration at construction so
/// the pipeline can trust shapes throughout.
#[derive(Debug, Default)]
pub struct EngineConfigurationBuilder {
    rulesets: HashMap<Language, RuleSet>,
    vocabulary: Vec<VocabTerm>,
    synonyms: HashMap<Language, Vec<SynonymEntry>>,
    brands: Option<Vec<BrandEntry>>,
    code_mappings: Option<HashMap<String, CodeMapping>>,
    weights: StageWeights,
}

impl EngineConfigurationBuilder {
    pub fn ruleset(mut self, language: Language, rules: RuleSet) -> Self {
        self.rulesets.insert(language, rules);
        self
    }

    pub fn vocabulary(mut self, terms: Vec<VocabTerm>) -> Self {
        self.vocabulary = terms;
        self
    }

    pub fn term(mut self, term: VocabTerm) -> Self {
        self.vocabulary.push(term);
        self
    }

    pub fn synonyms(mut self, language: Language, entries: Vec<SynonymEntry>) -> Self {
        self.synonyms.insert(language, entries);
        self
    }

    pub fn brands(mut self, brands: Vec<BrandEntry>) -> Self {
        self.brands = Some(brands);
        self
    }

    pub fn code_mappings(mut self, mappings: HashMap<String, CodeMapping>) -> Self {
        self.code_mappings = Some(mappings);
        self
    }

    pub fn weights(mut self, weights: StageWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Validate and freeze. Fails fast: a broken ruleset must never reach
    /// record processing.
    pub fn build(self) -> Result<EngineConfiguration, ConfigError> {
        for language in Language::supported() {
            let rules = self
                .rulesets
                .get(&language)
                .ok_or(ConfigError::MissingRuleSet { language })?;
            validate_ruleset(language, rules)?;
        }

        for (language, entries) in &self.synonyms {
            validate_aliases(*language, entries)?;
        }

        for term in &self.vocabulary {
            if !term.weight.is_finite() || term.weight < 0.0 {
                return Err(ConfigError::InvalidTermWeight {
                    term: term.term.clone(),
                    weight: term.weight,
                });
            }
        }

        Ok(EngineConfiguration {
            rulesets: self.rulesets,
            vocabulary: self.vocabulary,
            synonyms: self.synonyms,
            brands: self.brands,
            code_mappings: self.code_mappings,
            weights: self.weights,
        })
    }
}

/// Unvalidated wire shape of a configuration. Only exists to feed the
/// builder during deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfiguration {
    rulesets: HashMap<Language, RuleSet>,
    vocabulary: Vec<VocabTerm>,
    synonyms: HashMap<Language, Vec<SynonymEntry>>,
    brands: Option<Vec<BrandEntry>>,
    code_mappings: Option<HashMap<String, CodeMapping>>,
    weights: StageWeights,
}

impl TryFrom<RawConfiguration> for EngineConfiguration {
    type Error = ConfigError;

    fn try_from(raw: RawConfiguration) -> Result<Self, ConfigError> {
        EngineConfigurationBuilder {
            rulesets: raw.rulesets,
            vocabulary: raw.vocabulary,
            synonyms: raw.synonyms,
            brands: raw.brands,
            code_mappings: raw.code_mappings,
            weights: raw.weights,
        }
        .build()
    }
}

fn validate_ruleset(language: Language, rules: &RuleSet) -> Result<(), ConfigError> {
    if rules.blocker_penalty > 0.0 {
        return Err(ConfigError::InvalidRuleValue {
            rule: "blocker_penalty".into(),
            reason: format!("must be non-positive, got {}", rules.blocker_penalty),
        });
    }
    for demotion in &rules.demotions {
        if demotion.penalty > 0.0 {
            return Err(ConfigError::InvalidRuleValue {
                rule: format!("demotion '{}'", demotion.term),
                reason: format!("penalty must be non-positive, got {}", demotion.penalty),
            });
        }
    }
    for penalty in &rules.penalties {
        if penalty.penalty > 0.0 {
            return Err(ConfigError::InvalidRuleValue {
                rule: format!("penalty '{}'", penalty.term),
                reason: format!("must be non-positive, got {}", penalty.penalty),
            });
        }
    }
    for rule in &rules.cooccurrence {
        if rule.boost < 0.0 || !rule.boost.is_finite() {
            return Err(ConfigError::InvalidRuleValue {
                rule: format!("cooccurrence {:?}", rule.terms),
                reason: format!("boost must be non-negative, got {}", rule.boost),
            });
        }
    }
    for boost in &rules.contextual {
        if boost.factor <= 0.0 || !boost.factor.is_finite() {
            return Err(ConfigError::InvalidRuleValue {
                rule: format!("contextual '{}'", boost.name),
                reason: format!("factor must be positive, got {}", boost.factor),
            });
        }
    }
    if let Some(thresholds) = rules.thresholds {
        if !thresholds.is_ordered() {
            return Err(ConfigError::UnorderedThresholds {
                language,
                high: thresholds.high,
                medium: thresholds.medium,
                low: thresholds.low,
                rejection: thresholds.rejection,
            });
        }
    }
    Ok(())
}

fn validate_aliases(language: Language, entries: &[SynonymEntry]) -> Result<(), ConfigError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for entry in entries {
        for alias in &entry.aliases {
            if let Some(first) = seen.insert(alias.as_str(), entry.canonical.as_str()) {
                if first != entry.canonical {
                    return Err(ConfigError::AmbiguousAlias {
                        language,
                        alias: alias.clone(),
                        first: first.to_string(),
                        second: entry.canonical.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}
