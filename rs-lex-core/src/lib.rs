//! Word-learning and sentence-generation library.
//!
//! This crate provides a persistent, self-improving statistical word model
//! including:
//! - A vocabulary registry with validity and provenance tracking
//! - A pairwise transition-frequency table (first-order Markov chain)
//! - A text-ingestion pipeline (normalization, tokenization, n-grams)
//! - Frequency-weighted random-walk sentence generation and scoring
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Persistent stores: vocabulary, transition table and training log.
///
/// Exposes the combined `WordDatabase` with snapshot persistence,
/// statistics aggregation and clearing.
pub mod store;

/// Text normalization and ingestion pipeline.
///
/// Cleaning, tokenization, sentence and n-gram extraction, and the `learn`
/// entry point that feeds the stores.
pub mod processor;

/// Sentence generation by frequency-weighted random walk.
///
/// Exposes random and seeded generation plus sentence-quality scoring
/// against the learned transitions.
pub mod generator;

/// Error taxonomy shared across the crate.
pub mod error;

/// I/O utilities (atomic snapshot writes).
///
/// Not exposed
pub(crate) mod io;
