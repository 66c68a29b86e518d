//! # physio-classify
//!
//! The orchestrating layer of the classification core: the contextual
//! scorer, the multi-stage classification engine, the parallel batch
//! driver, and the stateless result filter.
//!
//! Classification of one record is pure and synchronous over the shared,
//! read-only [`EngineConfiguration`](physio_core::EngineConfiguration);
//! batches parallelize without locking.

pub mod engine;
pub mod filter;
pub mod scorer;

pub use engine::ClassificationEngine;
pub use filter::{FilterOptions, ResultFilter};
pub use scorer::{ContextualScorer, ScoreOutcome};
