//! Contextual scoring on top of a base score, with an auditable trail.
//!
//! Fixed stage order: hard blockers (terminal short-circuit) → soft
//! demotions → flat penalties → co-occurrence boosts → brand boost. Every
//! rule that fires appends one human-readable line recording its numeric
//! effect; the trail is part of the contract, surfaced to end users as the
//! rationale for a decision.

use std::collections::BTreeSet;

use physio_core::rules::RuleSet;
use physio_core::{BrandEntry, StageWeights};

/// Result of a full contextual scoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub score: f64,
    pub trail: Vec<String>,
    /// True when a hard blocker fired; no further stages ran.
    pub blocked: bool,
}

/// Applies one language's contextual rules. Borrows the shared
/// configuration; cheap to construct per record.
pub struct ContextualScorer<'a> {
    rules: &'a RuleSet,
    weights: &'a StageWeights,
    brands: Option<&'a [BrandEntry]>,
}

impl<'a> ContextualScorer<'a> {
    pub fn new(
        rules: &'a RuleSet,
        weights: &'a StageWeights,
        brands: Option<&'a [BrandEntry]>,
    ) -> Self {
        Self {
            rules,
            weights,
            brands,
        }
    }

    /// First hard blocker present in the text, as (category, term).
    /// Blocker presence is conclusive evidence of domain mismatch.
    pub fn find_blocker(&self, text: &str) -> Option<(&str, &str)> {
        for group in &self.rules.blockers {
            for term in &group.terms {
                if text.contains(term.as_str()) {
                    return Some((group.category.as_str(), term.as_str()));
                }
            }
        }
        None
    }

    /// Demotions, penalties, co-occurrence boosts, and keyword-group factor
    /// boosts. Returns the summed contribution; each applied rule appends a
    /// trail line.
    pub fn apply_contextual(
        &self,
        text: &str,
        matched_terms: &BTreeSet<String>,
        trail: &mut Vec<String>,
    ) -> f64 {
        let mut delta = 0.0;

        for demotion in &self.rules.demotions {
            if text.contains(demotion.term.as_str()) {
                delta += demotion.penalty;
                trail.push(format!(
                    "demotion '{}' ({:+.1})",
                    demotion.term, demotion.penalty
                ));
            }
        }

        for penalty in &self.rules.penalties {
            if text.contains(penalty.term.as_str()) {
                delta += penalty.penalty;
                trail.push(format!(
                    "penalty '{}' ({:+.1})",
                    penalty.term, penalty.penalty
                ));
            }
        }

        for rule in &self.rules.cooccurrence {
            if rule.terms.len() >= 2
                && rule
                    .terms
                    .iter()
                    .all(|t| matched_terms.contains(t.as_str()))
            {
                delta += rule.boost;
                trail.push(format!(
                    "co-occurrence {} ({:+.1})",
                    rule.terms.join(" + "),
                    rule.boost
                ));
            }
        }

        for boost in &self.rules.contextual {
            // First keyword present triggers the group once.
            if let Some(keyword) = boost
                .keywords
                .iter()
                .find(|k| text.contains(k.as_str()))
            {
                let points = (boost.factor - 1.0) * self.weights.contextual_scale;
                delta += points;
                trail.push(format!(
                    "contextual boost '{}' via '{}' (x{} => {:+.1})",
                    boost.name, keyword, boost.factor, points
                ));
            }
        }

        delta
    }

    /// Brand boost, applied once. Unknown or non-domain-focused brands
    /// contribute zero.
    pub fn brand_boost(&self, brand: &str, trail: &mut Vec<String>) -> f64 {
        let Some(brands) = self.brands else {
            return 0.0;
        };
        let needle = brand.trim().to_lowercase();
        let Some(entry) = brands.iter().find(|b| b.name.to_lowercase() == needle) else {
            trail.push(format!("brand '{brand}' unknown (+0.0)"));
            return 0.0;
        };
        if !entry.pt_focused {
            trail.push(format!("brand '{}' not domain-focused (+0.0)", entry.name));
            return 0.0;
        }
        let points = entry.reputation * self.weights.brand_reputation_scale;
        trail.push(format!(
            "brand boost '{}' (reputation {:.0}, {:+.1})",
            entry.name, entry.reputation, points
        ));
        points
    }

    /// Full contextual pass over a base score. Blockers short-circuit: the
    /// returned outcome is terminal and no later stage contributes.
    pub fn score(
        &self,
        base_score: f64,
        matched_terms: &BTreeSet<String>,
        text: &str,
        brand: Option<&str>,
    ) -> ScoreOutcome {
        if let Some((category, term)) = self.find_blocker(text) {
            return ScoreOutcome {
                score: base_score + self.rules.blocker_penalty,
                trail: vec![format!(
                    "hard blocker [{category}]: '{term}' ({:+.1})",
                    self.rules.blocker_penalty
                )],
                blocked: true,
            };
        }

        let mut trail = Vec::new();
        let mut score = base_score;
        score += self.apply_contextual(text, matched_terms, &mut trail);
        if let Some(brand) = brand {
            score += self.brand_boost(brand, &mut trail);
        }
        ScoreOutcome {
            score,
            trail,
            blocked: false,
        }
    }
}
