use serde::{Deserialize, Serialize};

/// Named numeric knobs for the classifier stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageWeights {
    /// Bonus for a structured code in a high-relevance tier.
    pub code_high_bonus: f64,
    /// Bonus for a medium-relevance tier.
    pub code_medium_bonus: f64,
    /// Signed penalty for an excluded tier.
    pub code_exclude_penalty: f64,
    /// Points per unit of contextual factor above 1.0:
    /// `points = (factor - 1.0) * contextual_scale`.
    pub contextual_scale: f64,
    /// Points per unit of brand reputation for a domain-focused brand.
    pub brand_reputation_scale: f64,
    /// Largest n-gram generated for phrase-level vocabulary matching.
    pub ngram_max: usize,
}

impl Default for StageWeights {
    fn default() -> Self {
        Self {
            code_high_bonus: 25.0,
            code_medium_bonus: 10.0,
            code_exclude_penalty: -40.0,
            contextual_scale: 20.0,
            brand_reputation_scale: 0.2,
            ngram_max: 3,
        }
    }
}
