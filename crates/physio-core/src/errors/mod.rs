//! Error taxonomy: fatal configuration errors, recoverable per-record
//! validation errors, and lexicon persistence errors, unified under
//! [`EngineError`].

mod config_error;
mod lexicon_error;
mod validation_error;

pub use config_error::ConfigError;
pub use lexicon_error::LexiconError;
pub use validation_error::ValidationError;

/// Top-level error for the classification core.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("record validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used across the workspace.
pub type EngineResult<T> = Result<T, EngineError>;
