//! # physio-text
//!
//! Language-specific text canonicalization and tokenization for the
//! classification pipeline. Pure functions over immutable tables: same
//! input and configuration always produce the same output.

pub mod language;
pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use language::detect_language;
pub use normalizer::Normalizer;
pub use tokenizer::Tokenizer;
