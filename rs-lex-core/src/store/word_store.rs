use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::LexiconError;
use crate::store::unix_timestamp;

/// Minimum length (in characters) for a word to enter the vocabulary.
pub const MIN_WORD_LEN: usize = 2;

/// Provenance of a vocabulary entry.
///
/// # Variants
/// - `Guessing`: recorded from manual feedback on a suggested candidate word.
/// - `TextLearning`: extracted from a learned training text.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordSource {
	Guessing,
	TextLearning,
}

/// A single vocabulary entry.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WordEntry {
	/// Case-folded word text, unique within the store.
	pub text: String,
	/// Whether the word was judged to be a real word.
	pub is_valid: bool,
	/// Where the judgement came from.
	pub learned_from: WordSource,
	/// Unix timestamp (seconds) of the last write for this key.
	pub created_at: u64,
	/// Insertion counter, refreshed on every write. Orders the listings.
	pub(crate) id: u64,
}

/// Registry of known words with validity and provenance.
///
/// # Responsibilities
/// - Case-fold and validate words before insertion
/// - Upsert entries with last-write-wins semantics
/// - Expose listings in a stable order for reproducible draws
///
/// # Invariants
/// - Every key is lower-case and at least `MIN_WORD_LEN` characters
/// - `next_id` is strictly greater than every stored id
/// - Re-writing a key fully replaces the previous entry, provenance included
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct WordStore {
	entries: HashMap<String, WordEntry>,
	next_id: u64,
}

impl WordStore {
	/// Inserts a word, or fully replaces the entry if the key already exists.
	///
	/// The word is case-folded first; the replaced entry keeps nothing from
	/// its previous life (validity, provenance and ordering all refresh).
	///
	/// # Errors
	/// Returns `LexiconError::Validation` when the folded word is shorter
	/// than `MIN_WORD_LEN` characters. Nothing is written in that case.
	pub fn upsert(&mut self, word: &str, is_valid: bool, source: WordSource) -> Result<(), LexiconError> {
		let key = word.to_lowercase();
		if key.chars().count() < MIN_WORD_LEN {
			return Err(LexiconError::validation(format!(
				"word '{key}' is shorter than {MIN_WORD_LEN} characters"
			)));
		}

		let id = self.next_id;
		self.next_id += 1;

		self.entries.insert(key.clone(), WordEntry {
			text: key,
			is_valid,
			learned_from: source,
			created_at: unix_timestamp(),
			id,
		});

		Ok(())
	}

	/// Looks up a word (case-folded).
	pub fn lookup(&self, word: &str) -> Option<&WordEntry> {
		self.entries.get(&word.to_lowercase())
	}

	/// Returns every entry, most-recently-written first.
	pub fn list_all(&self) -> Vec<&WordEntry> {
		let mut all: Vec<&WordEntry> = self.entries.values().collect();
		all.sort_by(|a, b| b.id.cmp(&a.id));
		all
	}

	/// Returns the texts of all valid words, oldest write first.
	///
	/// The order is stable across calls so a seeded uniform draw over the
	/// result is reproducible.
	pub fn list_valid(&self) -> Vec<String> {
		let mut valid: Vec<&WordEntry> = self.entries.values().filter(|e| e.is_valid).collect();
		valid.sort_by_key(|e| e.id);
		valid.into_iter().map(|e| e.text.clone()).collect()
	}

	/// Number of stored words.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when no words are stored.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of stored words currently marked valid.
	pub fn count_valid(&self) -> usize {
		self.entries.values().filter(|e| e.is_valid).count()
	}

	/// Removes every entry and resets the ordering counter.
	pub(crate) fn clear(&mut self) {
		self.entries.clear();
		self.next_id = 0;
	}
}
