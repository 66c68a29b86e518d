//! Per-language rule bundles: normalization rewrites, blockers, demotions,
//! co-occurrence and contextual boosts, penalties, thresholds.
//!
//! All rule values are signed additive contributions: boosts are positive,
//! demotions and penalties negative. The configuration builder rejects
//! wrong-signed values so the scorer never has to second-guess them.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DECISION_THRESHOLD;

/// One ordered normalization step: regex pattern → replacement.
/// Applied after the built-in baseline, in declared order; later steps may
/// depend on earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteRule {
    pub pattern: String,
    pub replacement: String,
}

/// A categorized list of hard-blocker substrings. Any hit is conclusive
/// evidence of domain mismatch and terminates scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockerGroup {
    pub category: String,
    pub terms: Vec<String>,
}

/// A soft demotion: substring presence applies `penalty` (negative) but
/// scoring continues. Multiple demotions accumulate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemotionRule {
    pub term: String,
    pub penalty: f64,
}

/// Canonical terms that jointly matched indicate compound domain signal.
/// The boost is additive, distinct from either term's own weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooccurrenceRule {
    pub terms: Vec<String>,
    pub boost: f64,
}

/// A keyword group with a multiplicative relevance factor. The first keyword
/// present triggers the group once; the factor is converted to additive
/// points at the configured contextual scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextBoost {
    pub name: String,
    pub keywords: Vec<String>,
    pub factor: f64,
}

/// A flat penalty applied when the substring is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyRule {
    pub term: String,
    pub penalty: f64,
}

/// The four confidence thresholds of one language bundle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    pub rejection: f64,
}

impl ConfidenceThresholds {
    /// Ordering invariant checked at configuration build time.
    pub fn is_ordered(&self) -> bool {
        self.high >= self.medium && self.medium >= self.low && self.low >= self.rejection
    }
}

/// The full rule bundle for one language.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Ordered normalization rewrites, applied after the baseline.
    pub rewrites: Vec<RewriteRule>,
    /// Hard blockers by category.
    pub blockers: Vec<BlockerGroup>,
    /// Signed contribution applied when a blocker fires (strongly negative).
    pub blocker_penalty: f64,
    pub demotions: Vec<DemotionRule>,
    pub cooccurrence: Vec<CooccurrenceRule>,
    pub contextual: Vec<ContextBoost>,
    pub penalties: Vec<PenaltyRule>,
    /// Stopwords added on top of the built-in language list.
    pub stopwords: Vec<String>,
    /// Absent thresholds fall back to the documented default decision
    /// threshold with no review band.
    pub thresholds: Option<ConfidenceThresholds>,
}

impl RuleSet {
    /// A ruleset with the conventional blocker penalty and nothing else.
    pub fn empty() -> Self {
        Self {
            blocker_penalty: -100.0,
            ..Self::default()
        }
    }

    /// Confidence at or above which a record is accepted.
    pub fn decision_threshold(&self) -> f64 {
        self.thresholds
            .map(|t| t.high)
            .unwrap_or(DEFAULT_DECISION_THRESHOLD)
    }

    /// Confidence at or above which a rejected record still warrants review.
    /// Without explicit thresholds there is no review band.
    pub fn review_threshold(&self) -> f64 {
        self.thresholds
            .map(|t| t.medium)
            .unwrap_or(DEFAULT_DECISION_THRESHOLD)
    }
}
