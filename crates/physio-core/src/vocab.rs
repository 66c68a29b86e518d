//! Vocabulary, synonym, brand, and structured-code entries.

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// A canonical vocabulary term stored in the lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabTerm {
    /// Canonical form; aliases resolve to this during tokenization.
    pub term: String,
    /// Base score contribution when the term matches.
    pub weight: f64,
    pub category: String,
    pub domain: String,
    /// Occurrence counter, used as a ranking tie-break.
    #[serde(default)]
    pub frequency: u64,
    pub language: Language,
}

impl VocabTerm {
    pub fn new(
        term: impl Into<String>,
        weight: f64,
        category: impl Into<String>,
        domain: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            term: term.into(),
            weight,
            category: category.into(),
            domain: domain.into(),
            frequency: 0,
            language,
        }
    }
}

/// A canonical term with its alias strings. Two aliases never map to two
/// different canonicals within one language bundle; the configuration
/// builder enforces that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub canonical: String,
    pub aliases: Vec<String>,
    pub weight: f64,
}

/// A known manufacturer with its domain reputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandEntry {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Reputation on a 0-100 scale; the brand stage scales this into points.
    pub reputation: f64,
    /// Whether the brand is focused on the target domain. Unfocused brands
    /// contribute zero.
    pub pt_focused: bool,
}

/// Relevance tier of a structured-code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeTier {
    HighRelevance,
    MediumRelevance,
    Exclude,
}

/// What a structured-code prefix means for classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeMapping {
    pub category: String,
    pub tier: CodeTier,
}
