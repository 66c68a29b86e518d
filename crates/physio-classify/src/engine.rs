//! ClassificationEngine: orchestrates the full per-record state machine.
//!
//! `start → blocked` (terminal) or
//! `start → code_analysis → vocab_match → contextual_rules →
//! brand_analysis → decided`.
//!
//! The engine owns derived read-only state (compiled normalizer, per-language
//! tokenizers and lexicons) built once from the shared configuration; record
//! classification is a pure function over it. Results are memoized by text
//! fingerprint.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use moka::sync::Cache;
use rayon::prelude::*;
use tracing::{debug, info};

use physio_core::constants::DEFAULT_CACHE_CAPACITY;
use physio_core::{
    BatchOutcome, ClassificationResult, ClassificationStatus, EngineConfiguration, EngineResult,
    Language, NormalizedRecord, Record, ScoreBreakdown, VocabTerm,
};
use physio_lexicon::Lexicon;
use physio_text::{detect_language, Normalizer, Tokenizer};

use crate::filter::{FilterOptions, ResultFilter};
use crate::scorer::ContextualScorer;

pub struct ClassificationEngine {
    config: Arc<EngineConfiguration>,
    normalizer: Normalizer,
    tokenizers: HashMap<Language, Tokenizer>,
    lexicons: HashMap<Language, Lexicon>,
    cache: Cache<String, ClassificationResult>,
}

impl ClassificationEngine {
    /// Build derived state from a validated configuration. Fails fast on
    /// anything malformed (bad rewrite patterns); configuration errors are
    /// fatal before any record is processed.
    pub fn new(config: Arc<EngineConfiguration>) -> EngineResult<Self> {
        let normalizer = Normalizer::from_rules(
            Language::supported()
                .into_iter()
                .map(|lang| (lang, config.ruleset(lang).rewrites.as_slice())),
        )?;

        let mut tokenizers = HashMap::new();
        for lang in Language::supported() {
            let ruleset = config.ruleset(lang);
            tokenizers.insert(
                lang,
                Tokenizer::new(lang, &ruleset.stopwords, config.alias_table(lang)),
            );
        }
        // Mixed-script text filters both stopword lists and resolves both
        // alias tables.
        let mut mixed_stopwords: Vec<String> = Vec::new();
        let mut mixed_aliases: HashMap<String, String> = HashMap::new();
        for lang in Language::supported() {
            mixed_stopwords.extend(config.ruleset(lang).stopwords.iter().cloned());
            mixed_aliases.extend(config.alias_table(lang));
        }
        tokenizers.insert(
            Language::Mixed,
            Tokenizer::new(Language::Mixed, &mixed_stopwords, mixed_aliases),
        );

        // One-time single-writer trie build; read-only afterwards.
        let mut lexicons: HashMap<Language, Lexicon> = HashMap::new();
        for lang in Language::supported() {
            lexicons.insert(lang, Lexicon::new());
        }
        for term in config.vocabulary() {
            if let Some(lexicon) = lexicons.get_mut(&term.language) {
                lexicon.insert(&term.term, term.clone());
            }
        }
        for (lang, lexicon) in &lexicons {
            info!(
                language = %lang,
                terms = lexicon.term_count(),
                nodes = lexicon.node_count(),
                "lexicon built"
            );
        }

        Ok(Self {
            config,
            normalizer,
            tokenizers,
            lexicons,
            cache: Cache::builder()
                .max_capacity(DEFAULT_CACHE_CAPACITY)
                .build(),
        })
    }

    /// The configuration this engine was built from.
    pub fn configuration(&self) -> &EngineConfiguration {
        &self.config
    }

    /// Normalize and tokenize one record. Exposed for the filter and for
    /// callers that need the derived record without a classification.
    pub fn normalize_record(&self, record: &Record) -> NormalizedRecord {
        let raw = record.raw_text();
        let language = detect_language(&raw);
        let canonical_name = self.normalizer.normalize(&record.name, language);
        let searchable_text = self.normalizer.normalize(&raw, language);
        let tokenizer = &self.tokenizers[&language];
        let token_stream = tokenizer.token_stream(&searchable_text);
        let token_set: BTreeSet<String> = token_stream.iter().cloned().collect();
        let fingerprint = NormalizedRecord::fingerprint_of(&searchable_text);
        NormalizedRecord {
            language,
            canonical_name,
            searchable_text,
            token_stream,
            token_set,
            fingerprint,
        }
    }

    /// Classify a single record. Pure given a fixed configuration: the same
    /// record always yields an identical result.
    pub fn classify(&self, record: &Record) -> EngineResult<ClassificationResult> {
        record.validate()?;

        let normalized = self.normalize_record(record);
        let language = normalized.language;
        // The fingerprint covers only the free text; the structured code is
        // score-affecting input of its own and must key the cache too.
        let cache_key = format!(
            "{}:{}:{}",
            language.code(),
            record.code.as_deref().unwrap_or(""),
            normalized.fingerprint
        );

        if let Some(mut hit) = self.cache.get(&cache_key) {
            debug!(record = %record.id, "fingerprint cache hit");
            // Identity fields carry no score weight of their own and are
            // re-stamped from the incoming record. The brand echo keeps the
            // caller's casing; the brand stage matched case-insensitively.
            hit.record_id = record.id.clone();
            hit.brand = record.brand.clone();
            hit.region = record.region.clone();
            hit.equipment_type = record.equipment_type.clone();
            return Ok(hit);
        }

        let ruleset = self.config.ruleset(language);
        let scorer = ContextualScorer::new(ruleset, self.config.weights(), self.config.brands());

        // blocked (terminal): floor confidence, negative decision, and the
        // single blocker line as the whole trail.
        if let Some((category, term)) = scorer.find_blocker(&normalized.searchable_text) {
            debug!(record = %record.id, blocker = term, "hard blocker hit");
            let breakdown = ScoreBreakdown {
                blocker: ruleset.blocker_penalty,
                ..Default::default()
            };
            let trail = vec![format!(
                "hard blocker [{category}]: '{term}' ({:+.1})",
                ruleset.blocker_penalty
            )];
            let result = self.finish(record, &normalized, breakdown, trail, Vec::new(), None, None);
            self.cache.insert(cache_key, result.clone());
            return Ok(result);
        }

        let mut trail: Vec<String> = Vec::new();
        let mut breakdown = ScoreBreakdown::default();

        // code_analysis (optional).
        let mut category = self.code_analysis(record, &mut breakdown, &mut trail);
        let mut domain = None;

        // vocab_match.
        let (matched_terms, tags, best) = self.vocab_match(&normalized, &mut breakdown, &mut trail);
        if let Some(best) = best {
            // The highest-weight vocabulary match is the authoritative
            // category/domain source.
            category = Some(best.category.clone());
            domain = Some(best.domain.clone());
        }

        // contextual_rules.
        breakdown.contextual =
            scorer.apply_contextual(&normalized.searchable_text, &matched_terms, &mut trail);

        // brand_analysis (optional).
        match (record.brand.as_deref(), self.config.brands()) {
            (Some(brand), Some(_)) => {
                breakdown.brand = scorer.brand_boost(brand, &mut trail);
            }
            (Some(_), None) => {
                trail.push("brand analysis skipped: no brand data configured".into());
            }
            (None, _) => {
                trail.push("brand analysis skipped: record has no brand".into());
            }
        }

        // decided.
        let result = self.finish(record, &normalized, breakdown, trail, tags, category, domain);
        debug!(
            record = %record.id,
            confidence = result.confidence,
            accepted = result.accepted,
            "classified"
        );
        self.cache.insert(cache_key, result.clone());
        Ok(result)
    }

    /// Classify a batch in parallel. Order-preserving: output index i
    /// corresponds to input record i. Invalid records become explicit skip
    /// markers instead of aborting the batch.
    pub fn classify_batch(&self, records: &[Record]) -> Vec<BatchOutcome> {
        records
            .par_iter()
            .map(|record| match self.classify(record) {
                Ok(result) => BatchOutcome::Classified(result),
                Err(err) => BatchOutcome::Skipped {
                    id: record.id.clone(),
                    reason: err.to_string(),
                },
            })
            .collect()
    }

    /// Facet a batch of results using this engine's normalizer/tokenizers
    /// for the free-text query.
    pub fn filter(
        &self,
        results: &[ClassificationResult],
        options: &FilterOptions,
    ) -> Vec<ClassificationResult> {
        ResultFilter::new(&self.normalizer, &self.tokenizers).apply(results, options)
    }

    fn code_analysis(
        &self,
        record: &Record,
        breakdown: &mut ScoreBreakdown,
        trail: &mut Vec<String>,
    ) -> Option<String> {
        let weights = self.config.weights();
        match (record.code.as_deref(), self.config.code_mappings()) {
            (Some(code), Some(mappings)) => {
                // Longest configured prefix of the code wins.
                let hit = mappings
                    .iter()
                    .filter(|(prefix, _)| code.starts_with(prefix.as_str()))
                    .max_by_key(|(prefix, _)| prefix.len());
                match hit {
                    Some((prefix, mapping)) => {
                        use physio_core::CodeTier;
                        let (points, tier) = match mapping.tier {
                            CodeTier::HighRelevance => (weights.code_high_bonus, "high"),
                            CodeTier::MediumRelevance => (weights.code_medium_bonus, "medium"),
                            CodeTier::Exclude => (weights.code_exclude_penalty, "exclude"),
                        };
                        breakdown.code = points;
                        trail.push(format!(
                            "structured code '{code}' prefix '{prefix}' tier {tier} ({points:+.1})"
                        ));
                        matches!(mapping.tier, CodeTier::HighRelevance)
                            .then(|| mapping.category.clone())
                    }
                    None => {
                        trail.push(format!("structured code '{code}' unmatched (+0.0)"));
                        None
                    }
                }
            }
            (None, _) => {
                trail.push("code analysis skipped: no structured code".into());
                None
            }
            (Some(_), None) => {
                trail.push("code analysis skipped: no code mappings configured".into());
                None
            }
        }
    }

    /// Look up every token and n-gram against the detected language's
    /// lexicon. Mixed-script text consults both lexicons, English first.
    /// Returns the matched canonical set, match-ordered tags, and the
    /// single highest-weight match (earlier-found wins ties).
    fn vocab_match(
        &self,
        normalized: &NormalizedRecord,
        breakdown: &mut ScoreBreakdown,
        trail: &mut Vec<String>,
    ) -> (BTreeSet<String>, Vec<String>, Option<VocabTerm>) {
        let languages: &[Language] = match normalized.language {
            Language::Arabic => &[Language::Arabic],
            Language::English => &[Language::English],
            Language::Mixed => &[Language::English, Language::Arabic],
        };
        let tokenizer = &self.tokenizers[&normalized.language];

        let mut candidates: Vec<String> = normalized.token_set.iter().cloned().collect();
        for n in 2..=self.config.weights().ngram_max {
            candidates.extend(Tokenizer::n_grams(&normalized.token_stream, n));
        }

        let mut matched: BTreeSet<String> = BTreeSet::new();
        let mut tags: Vec<String> = Vec::new();
        let mut best: Option<VocabTerm> = None;

        for candidate in &candidates {
            let canonical = tokenizer.canonical(candidate).unwrap_or(candidate.as_str());
            for lang in languages {
                let Some(term) = self.lexicons[lang].lookup_exact(canonical) else {
                    continue;
                };
                if matched.insert(term.term.clone()) {
                    breakdown.vocabulary += term.weight;
                    tags.push(term.term.clone());
                    trail.push(format!(
                        "vocabulary match '{}' [{}] ({:+.1})",
                        term.term, term.category, term.weight
                    ));
                    let better = best
                        .as_ref()
                        .map(|b| term.weight > b.weight)
                        .unwrap_or(true);
                    if better {
                        best = Some(term.clone());
                    }
                }
                break;
            }
        }

        (matched, tags, best)
    }

    /// Assemble the final result: clamp the summed contributions, derive the
    /// status band, and carry the audit data.
    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        record: &Record,
        normalized: &NormalizedRecord,
        breakdown: ScoreBreakdown,
        trail: Vec<String>,
        tags: Vec<String>,
        category: Option<String>,
        domain: Option<String>,
    ) -> ClassificationResult {
        let ruleset = self.config.ruleset(normalized.language);
        let confidence = breakdown.confidence();
        let status = if confidence >= ruleset.decision_threshold() {
            ClassificationStatus::Accepted
        } else if ruleset.thresholds.is_some() && confidence >= ruleset.review_threshold() {
            ClassificationStatus::Review
        } else {
            ClassificationStatus::Rejected
        };

        ClassificationResult {
            record_id: record.id.clone(),
            accepted: status == ClassificationStatus::Accepted,
            status,
            confidence,
            category,
            domain,
            brand: record.brand.clone(),
            region: record.region.clone(),
            equipment_type: record.equipment_type.clone(),
            tags,
            language: normalized.language,
            explanations: trail,
            breakdown,
            searchable_text: normalized.searchable_text.clone(),
            token_set: normalized.token_set.iter().cloned().collect(),
            fingerprint: normalized.fingerprint.clone(),
        }
    }
}
