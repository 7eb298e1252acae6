use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::store::unix_timestamp;

/// A single observed adjacency and its occurrence count.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Transition {
	/// The word that followed.
	pub next: String,
	/// How many times this adjacency was observed.
	pub frequency: u64,
	/// Unix timestamp (seconds) of the first observation.
	pub created_at: u64,
}

/// Pairwise transition-frequency table, the first-order Markov chain
/// approximated from bigram and trigram observations.
///
/// # Responsibilities
/// - Accumulate adjacency observations with upsert-increment semantics
/// - Expose per-word candidate lists ordered for weighted sampling
///
/// # Invariants
/// - Every stored frequency is >= 1 and never decreases
/// - Candidates for a word keep their first-insertion order
/// - No referential check against the vocabulary: transitions may name
///   words the word store has never seen
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SequenceStore {
	transitions: HashMap<String, Vec<Transition>>,
}

impl SequenceStore {
	/// Records one observation of `word2` following `word1`.
	///
	/// Both words are case-folded. The first observation creates the pair
	/// with frequency 1; every later one increments it. The whole operation
	/// happens under the single `&mut self` borrow, so there is no separate
	/// read-then-write window to race through.
	pub fn record_transition(&mut self, word1: &str, word2: &str) {
		let next = word2.to_lowercase();
		let candidates = self.transitions.entry(word1.to_lowercase()).or_default();

		match candidates.iter_mut().find(|t| t.next == next) {
			Some(t) => t.frequency += 1,
			None => candidates.push(Transition {
				next,
				frequency: 1,
				created_at: unix_timestamp(),
			}),
		}
	}

	/// Returns the candidates observed after `word1`, most frequent first.
	///
	/// Frequency ties keep their first-insertion order (the sort is stable),
	/// so weighted sampling over the result is reproducible.
	pub fn get_transitions(&self, word1: &str) -> Vec<(String, u64)> {
		let mut candidates: Vec<(String, u64)> = self
			.transitions
			.get(&word1.to_lowercase())
			.map(|c| c.iter().map(|t| (t.next.clone(), t.frequency)).collect())
			.unwrap_or_default();

		candidates.sort_by(|a, b| b.1.cmp(&a.1));
		candidates
	}

	/// Total number of distinct (word1, word2) pairs.
	pub fn len(&self) -> usize {
		self.transitions.values().map(Vec::len).sum()
	}

	/// True when no transitions are stored.
	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Removes every stored pair.
	pub(crate) fn clear(&mut self) {
		self.transitions.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn repeated_observations_accumulate() {
		let mut store = SequenceStore::default();
		for _ in 0..5 {
			store.record_transition("the", "fox");
		}

		assert_eq!(store.get_transitions("the"), vec![("fox".to_owned(), 5)]);
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn transitions_are_case_folded() {
		let mut store = SequenceStore::default();
		store.record_transition("The", "Fox");
		store.record_transition("the", "fox");

		assert_eq!(store.get_transitions("THE"), vec![("fox".to_owned(), 2)]);
	}

	#[test]
	fn candidates_sort_by_frequency_descending() {
		let mut store = SequenceStore::default();
		store.record_transition("we", "walk");
		store.record_transition("we", "run");
		store.record_transition("we", "run");

		assert_eq!(
			store.get_transitions("we"),
			vec![("run".to_owned(), 2), ("walk".to_owned(), 1)]
		);
	}

	#[test]
	fn frequency_ties_keep_first_insertion_order() {
		let mut store = SequenceStore::default();
		store.record_transition("it", "rains");
		store.record_transition("it", "pours");
		store.record_transition("it", "snows");

		let ordered: Vec<String> = store
			.get_transitions("it")
			.into_iter()
			.map(|(word, _)| word)
			.collect();
		assert_eq!(ordered, vec!["rains", "pours", "snows"]);
	}

	#[test]
	fn unknown_word_has_no_transitions() {
		let store = SequenceStore::default();
		assert!(store.get_transitions("ghost").is_empty());
	}
}
