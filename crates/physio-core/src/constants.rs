//! Shared numeric constants for the classification pipeline.

/// Decision threshold used when a language's RuleSet does not define
/// explicit confidence thresholds. Explicit policy, not an implicit literal:
/// records scoring at or above this are accepted, everything else rejected.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 45.0;

/// Lower clamp bound for the final confidence score.
pub const CONFIDENCE_FLOOR: f64 = 0.0;

/// Upper clamp bound for the final confidence score.
pub const CONFIDENCE_CEILING: f64 = 100.0;

/// Hard cap on the fuzzy-lookup edit-distance budget. Branching cost grows
/// combinatorially with the budget, so callers asking for more get this.
pub const MAX_FUZZY_DISTANCE: usize = 3;

/// Default capacity of the engine's per-fingerprint result cache.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Minimum number of characters of a script that must be present before a
/// text counts as mixed Arabic/Latin rather than single-script.
pub const MIXED_SCRIPT_MIN_CHARS: usize = 3;

/// Tokens shorter than this (in chars) are discarded by the tokenizer.
pub const MIN_TOKEN_CHARS: usize = 2;
