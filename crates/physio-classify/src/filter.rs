//! Stateless predicate filtering and faceting over classified batches.
//!
//! Every facet is optional; present facets narrow by logical AND. Category
//! and brand matching is soft (normalized substring containment in either
//! direction) to tolerate partial and alias names; status, tag, region, and
//! type facets require exact equality. The free-text query is normalized
//! and tokenized with the same machinery as record text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use physio_core::{ClassificationResult, ClassificationStatus, Language};
use physio_text::{detect_language, Normalizer, Tokenizer};

/// Optional facets. Within a multi-valued facet any listed value matches;
/// across facets all present facets must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub statuses: Option<Vec<ClassificationStatus>>,
    pub categories: Option<Vec<String>>,
    pub brands: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub regions: Option<Vec<String>>,
    pub equipment_types: Option<Vec<String>>,
    pub query: Option<String>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
}

/// Pure filter over already-classified results. Never mutates its input.
pub struct ResultFilter<'a> {
    normalizer: &'a Normalizer,
    tokenizers: &'a HashMap<Language, Tokenizer>,
}

impl<'a> ResultFilter<'a> {
    pub fn new(
        normalizer: &'a Normalizer,
        tokenizers: &'a HashMap<Language, Tokenizer>,
    ) -> Self {
        Self {
            normalizer,
            tokenizers,
        }
    }

    /// Apply all present facets, returning the narrowed subset (cloned).
    pub fn apply(
        &self,
        results: &[ClassificationResult],
        options: &FilterOptions,
    ) -> Vec<ClassificationResult> {
        let query_tokens = options.query.as_deref().map(|q| self.query_tokens(q));

        results
            .iter()
            .filter(|r| Self::matches_statuses(r, options.statuses.as_deref()))
            .filter(|r| Self::matches_soft(r.category.as_deref(), options.categories.as_deref()))
            .filter(|r| Self::matches_soft(r.brand.as_deref(), options.brands.as_deref()))
            .filter(|r| Self::matches_tags(r, options.tags.as_deref()))
            .filter(|r| Self::matches_exact(r.region.as_deref(), options.regions.as_deref()))
            .filter(|r| {
                Self::matches_exact(
                    r.equipment_type.as_deref(),
                    options.equipment_types.as_deref(),
                )
            })
            .filter(|r| Self::matches_query(r, query_tokens.as_deref()))
            .filter(|r| options.min_score.map(|min| r.confidence >= min).unwrap_or(true))
            .filter(|r| options.max_score.map(|max| r.confidence <= max).unwrap_or(true))
            .cloned()
            .collect()
    }

    /// Normalize and tokenize the free-text query with the language-matched
    /// tables. Falls back to plain whitespace tokens when no tokenizer is
    /// registered for the detected language.
    fn query_tokens(&self, query: &str) -> Vec<String> {
        let language = detect_language(query);
        let canonical = self.normalizer.normalize(query, language);
        match self
            .tokenizers
            .get(&language)
            .or_else(|| self.tokenizers.get(&language.ruleset_language()))
        {
            Some(tokenizer) => tokenizer.token_stream(&canonical),
            None => canonical.split_whitespace().map(str::to_string).collect(),
        }
    }

    fn matches_statuses(
        result: &ClassificationResult,
        statuses: Option<&[ClassificationStatus]>,
    ) -> bool {
        statuses
            .map(|wanted| wanted.contains(&result.status))
            .unwrap_or(true)
    }

    /// Soft facet: normalized substring containment in either direction.
    fn matches_soft(value: Option<&str>, wanted: Option<&[String]>) -> bool {
        let Some(wanted) = wanted else { return true };
        let Some(value) = value else { return false };
        let value = value.to_lowercase();
        wanted.iter().any(|w| {
            let w = w.to_lowercase();
            value.contains(&w) || w.contains(&value)
        })
    }

    fn matches_exact(value: Option<&str>, wanted: Option<&[String]>) -> bool {
        let Some(wanted) = wanted else { return true };
        let Some(value) = value else { return false };
        wanted.iter().any(|w| w == value)
    }

    /// Tag facet: any requested tag present verbatim.
    fn matches_tags(result: &ClassificationResult, wanted: Option<&[String]>) -> bool {
        wanted
            .map(|tags| tags.iter().any(|t| result.tags.contains(t)))
            .unwrap_or(true)
    }

    /// Every query token must appear as a substring of the searchable text
    /// or as an element of the precomputed token set.
    fn matches_query(result: &ClassificationResult, tokens: Option<&[String]>) -> bool {
        let Some(tokens) = tokens else { return true };
        tokens.iter().all(|token| {
            result.searchable_text.contains(token.as_str())
                || result.token_set.iter().any(|t| t == token)
        })
    }
}
