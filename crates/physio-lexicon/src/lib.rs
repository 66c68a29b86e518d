//! # physio-lexicon
//!
//! The domain vocabulary store: a compressed radix trie over canonical
//! terms, holding tens of thousands of multilingual entries. Nodes live in
//! an arena and reference each other by integer index, which keeps
//! serialization flat and ownership trivial. Built once, read-only for the
//! rest of the classification lifecycle.

pub mod trie;

pub use trie::{FuzzyMatch, Lexicon};
