//! # physio-core
//!
//! Foundation crate for the physio-screen classification core.
//! Defines all shared types, errors, configuration, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod language;
pub mod record;
pub mod result;
pub mod rules;
pub mod vocab;
pub mod weights;

// Re-export the most commonly used types at the crate root.
pub use config::{EngineConfiguration, EngineConfigurationBuilder};
pub use errors::{ConfigError, EngineError, EngineResult, LexiconError, ValidationError};
pub use language::Language;
pub use record::{NormalizedRecord, Record};
pub use result::{BatchOutcome, ClassificationResult, ClassificationStatus, ScoreBreakdown};
pub use rules::{ConfidenceThresholds, RuleSet};
pub use vocab::{BrandEntry, CodeMapping, CodeTier, SynonymEntry, VocabTerm};
pub use weights::StageWeights;
