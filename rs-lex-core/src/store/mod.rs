//! Persistent storage for the word-learning model.
//!
//! Three record sets live here, owned together by [`WordDatabase`]:
//! - the vocabulary ([`word_store::WordStore`])
//! - the pairwise transition-frequency table ([`sequence_store::SequenceStore`])
//! - the append-only training-text log
//!
//! The whole database serializes as one compact binary snapshot and is
//! shared by reference between the ingestion pipeline, the generator and
//! any statistics consumer.

/// Pairwise transition-frequency table.
///
/// Accumulates adjacency observations and serves frequency-ordered
/// candidate lists for weighted sampling.
pub mod sequence_store;

/// Vocabulary registry.
///
/// Tracks word validity and provenance with last-write-wins upserts.
pub mod word_store;

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::LexiconError;
use crate::io;
use crate::store::sequence_store::SequenceStore;
use crate::store::word_store::WordStore;

/// Seconds since the unix epoch, saturating to 0 on a pre-epoch clock.
pub(crate) fn unix_timestamp() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs())
		.unwrap_or(0)
}

/// One raw training input, kept verbatim.
///
/// Entries are append-only and never deduplicated: the log records what was
/// observed, not what was derived from it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TrainingText {
	/// The unmodified input text.
	pub content: String,
	/// Unix timestamp (seconds) of ingestion.
	pub processed_at: u64,
}

/// Aggregated read-only counters over the whole database.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Statistics {
	pub total_words: usize,
	pub valid_words: usize,
	pub invalid_words: usize,
	pub training_texts: usize,
	pub sequences: usize,
}

/// The full learned model: vocabulary, transition table and training log.
///
/// # Responsibilities
/// - Own the word and sequence stores plus the append-only training log
/// - Load from and save to a compact binary snapshot (`postcard`)
/// - Aggregate statistics and clear every record set on request
///
/// # Invariants
/// - A snapshot round-trip preserves entries, frequencies, ordering
///   counters and the training log exactly
/// - `clear_all` empties all three record sets; there is no soft delete
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct WordDatabase {
	words: WordStore,
	sequences: SequenceStore,
	training_texts: Vec<TrainingText>,
}

impl WordDatabase {
	/// Creates an empty database.
	pub fn new() -> Self {
		Self::default()
	}

	/// Loads a database snapshot, or starts empty when no file exists yet.
	///
	/// # Errors
	/// Returns `LexiconError::Persistence` when the file exists but cannot
	/// be read or decoded.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
		let path = path.as_ref();
		if !path.exists() {
			log::info!("no snapshot at {}, starting empty", path.display());
			return Ok(Self::default());
		}

		let bytes = fs::read(path).map_err(|e| LexiconError::persistence("snapshot read", e))?;
		let db: Self =
			postcard::from_bytes(&bytes).map_err(|e| LexiconError::persistence("snapshot decode", e))?;

		log::info!(
			"loaded snapshot from {} ({} words, {} sequences)",
			path.display(),
			db.words.len(),
			db.sequences.len()
		);
		Ok(db)
	}

	/// Serializes the whole database and atomically replaces the snapshot.
	///
	/// # Errors
	/// Returns `LexiconError::Persistence` on serialization or file I/O
	/// failure; the previous snapshot is left untouched in that case.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LexiconError> {
		let bytes =
			postcard::to_stdvec(self).map_err(|e| LexiconError::persistence("snapshot encode", e))?;
		io::write_atomic(path.as_ref(), &bytes)
			.map_err(|e| LexiconError::persistence("snapshot write", e))?;
		Ok(())
	}

	/// The vocabulary.
	pub fn words(&self) -> &WordStore {
		&self.words
	}

	/// The vocabulary, mutable.
	pub fn words_mut(&mut self) -> &mut WordStore {
		&mut self.words
	}

	/// The transition table.
	pub fn sequences(&self) -> &SequenceStore {
		&self.sequences
	}

	/// The transition table, mutable.
	pub fn sequences_mut(&mut self) -> &mut SequenceStore {
		&mut self.sequences
	}

	/// Appends a raw text to the training log, verbatim.
	pub(crate) fn push_training_text(&mut self, content: &str) {
		self.training_texts.push(TrainingText {
			content: content.to_owned(),
			processed_at: unix_timestamp(),
		});
	}

	/// The append-only training log, oldest first.
	pub fn training_texts(&self) -> &[TrainingText] {
		&self.training_texts
	}

	/// Aggregates counters over all three record sets. Read-only.
	pub fn statistics(&self) -> Statistics {
		let total_words = self.words.len();
		let valid_words = self.words.count_valid();

		Statistics {
			total_words,
			valid_words,
			invalid_words: total_words - valid_words,
			training_texts: self.training_texts.len(),
			sequences: self.sequences.len(),
		}
	}

	/// Deletes every row from all three record sets. Irreversible.
	pub fn clear_all(&mut self) {
		self.words.clear();
		self.sequences.clear();
		self.training_texts.clear();
		log::info!("cleared all learned data");
	}
}
