//! Input records and their normalized, pipeline-owned derivations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::language::Language;

/// An inventory record as produced by the ingestion collaborator.
/// Immutable once handed to the classifier.
///
/// `region` and `equipment_type` are optional ingestion metadata columns;
/// they pass through to results so batches can be faceted on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub equipment_type: Option<String>,
}

impl Record {
    /// Minimal record with just an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            brand: None,
            model: None,
            category: None,
            code: None,
            region: None,
            equipment_type: None,
        }
    }

    /// Check the required fields. Blank (all-whitespace) counts as missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingId);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// All free-text fields joined for normalization, name first.
    pub fn raw_text(&self) -> String {
        let mut text = self.name.clone();
        for part in [
            self.description.as_deref(),
            self.brand.as_deref(),
            self.model.as_deref(),
            self.category.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            text.push(' ');
            text.push_str(part);
        }
        text
    }
}

/// Canonicalized form of one record, owned by a single pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Detected language of the raw text.
    pub language: Language,
    /// Canonicalized name.
    pub canonical_name: String,
    /// Canonicalized concatenation of all text fields, used for substring
    /// rules and as the fingerprint input.
    pub searchable_text: String,
    /// Surviving tokens in text order (duplicates kept), for n-grams.
    pub token_stream: Vec<String>,
    /// Deduplicated tokens with stable iteration order.
    pub token_set: BTreeSet<String>,
    /// blake3 hex digest of the searchable text, for caching and dedup.
    pub fingerprint: String,
}

impl NormalizedRecord {
    /// Stable fingerprint of a canonical text.
    pub fn fingerprint_of(canonical_text: &str) -> String {
        blake3::hash(canonical_text.as_bytes()).to_hex().to_string()
    }
}
