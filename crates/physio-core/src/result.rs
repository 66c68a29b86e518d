//! Classification output: scored decision, status band, explanation trail,
//! and the per-stage score breakdown.

use serde::{Deserialize, Serialize};

use crate::constants::{CONFIDENCE_CEILING, CONFIDENCE_FLOOR};
use crate::language::Language;

/// Acceptance band derived from the language's confidence thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationStatus {
    Accepted,
    Review,
    Rejected,
}

/// Named per-stage contributions. They sum to the final confidence before
/// clamping into [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub blocker: f64,
    pub code: f64,
    pub vocabulary: f64,
    pub contextual: f64,
    pub brand: f64,
}

impl ScoreBreakdown {
    /// Pre-clamp sum of all stage contributions.
    pub fn total(&self) -> f64 {
        self.blocker + self.code + self.vocabulary + self.contextual + self.brand
    }

    /// The clamped confidence this breakdown produces.
    pub fn confidence(&self) -> f64 {
        self.total().clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
    }
}

/// The scored decision for one record.
///
/// Self-describing on purpose: it carries the searchable text, token set,
/// and record metadata echoes so the result filter can facet a batch
/// without re-reading input records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub record_id: String,
    /// True when confidence reached the language's decision threshold.
    pub accepted: bool,
    pub status: ClassificationStatus,
    /// Clamped into [0, 100].
    pub confidence: f64,
    pub category: Option<String>,
    pub domain: Option<String>,
    pub brand: Option<String>,
    pub region: Option<String>,
    pub equipment_type: Option<String>,
    /// Matched canonical terms, in match order.
    pub tags: Vec<String>,
    pub language: Language,
    /// Ordered, append-only audit trail: one line per rule that fired.
    pub explanations: Vec<String>,
    pub breakdown: ScoreBreakdown,
    /// Canonicalized concatenation of the record's text fields.
    pub searchable_text: String,
    /// Sorted, deduplicated tokens of the searchable text.
    pub token_set: Vec<String>,
    pub fingerprint: String,
}

/// Outcome of one record within a batch. Every valid input gets a
/// `Classified` entry; invalid records get an explicit skip marker instead
/// of silently disappearing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BatchOutcome {
    Classified(ClassificationResult),
    Skipped { id: String, reason: String },
}

impl BatchOutcome {
    pub fn as_classified(&self) -> Option<&ClassificationResult> {
        match self {
            BatchOutcome::Classified(result) => Some(result),
            BatchOutcome::Skipped { .. } => None,
        }
    }
}
