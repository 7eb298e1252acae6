//! Sentence generation by frequency-weighted random walk.
//!
//! The walk treats the sequence store as a first-order Markov chain: the
//! next word depends only on the current one, chosen with probability
//! proportional to its observed frequency. Words without successors restart
//! the walk from a uniform vocabulary draw instead of terminating it.

use rand::Rng;
use rand::rngs::ThreadRng;
use serde::Serialize;

use crate::error::LexiconError;
use crate::processor::{KEPT_PUNCTUATION, round2};
use crate::store::WordDatabase;

/// Returned by `generate` when no valid vocabulary exists yet.
pub const EMPTY_VOCABULARY_MESSAGE: &str = "No words learned yet. Please learn some words first!";

/// Probability of ending the walk once the minimum length is reached.
const STOP_PROBABILITY: f64 = 0.3;

/// Quality metrics for a sentence scored against the learned model.
#[derive(Serialize, Clone, Debug)]
pub struct SentenceQuality {
	pub word_count: usize,
	pub avg_word_length: f64,
	/// Mean learned frequency over the sentence's adjacent word pairs.
	pub coherence_score: f64,
	/// One of `empty`, `low`, `medium`, `high`.
	pub quality: &'static str,
}

/// Frequency-weighted random-walk sentence generator.
///
/// # Responsibilities
/// - Walk the transition table, weighting candidates by observed frequency
/// - Fall back to a uniform vocabulary draw when a word has no successors
/// - Score arbitrary sentences for coherence against the learned transitions
///
/// # Notes
/// - The uniform draw source is injectable: production uses the
///   thread-local RNG, tests pass a seeded `StdRng` so every selection is
///   reproducible.
pub struct SentenceGenerator<R: Rng = ThreadRng> {
	rng: R,
}

impl SentenceGenerator {
	/// Creates a generator backed by the thread-local RNG.
	pub fn new() -> Self {
		Self { rng: rand::rng() }
	}
}

impl Default for SentenceGenerator {
	fn default() -> Self {
		Self::new()
	}
}

impl<R: Rng> SentenceGenerator<R> {
	/// Creates a generator with a caller-supplied draw source.
	pub fn with_rng(rng: R) -> Self {
		Self { rng }
	}

	/// Generates a sentence from a random valid starting word.
	///
	/// # Behavior
	/// - Returns `EMPTY_VOCABULARY_MESSAGE` when no valid words exist;
	///   an empty model is not an error here.
	/// - After `min_length` words, each step stops the walk with
	///   probability 0.3; `max_length` caps the walk regardless.
	pub fn generate(&mut self, db: &WordDatabase, max_length: usize, min_length: usize) -> String {
		let valid_words = db.words().list_valid();
		if valid_words.is_empty() {
			return EMPTY_VOCABULARY_MESSAGE.to_owned();
		}

		let first = valid_words[self.rng.random_range(0..valid_words.len())].clone();
		let words = self.walk(db, first, max_length, min_length);
		finish_sentence(&words)
	}

	/// Generates a sentence starting from a caller-supplied word.
	///
	/// The walk is the same as `generate`; only the first word differs.
	///
	/// # Errors
	/// Returns `LexiconError::NotFound` when the seed is unknown to the
	/// vocabulary or marked invalid. There is no silent substitution.
	pub fn generate_from_seed(
		&mut self,
		db: &WordDatabase,
		seed: &str,
		max_length: usize,
		min_length: usize,
	) -> Result<String, LexiconError> {
		let seed = seed.to_lowercase();
		match db.words().lookup(&seed) {
			Some(entry) if entry.is_valid => (),
			_ => return Err(LexiconError::not_found(&seed)),
		}

		let words = self.walk(db, seed, max_length, min_length);
		Ok(finish_sentence(&words))
	}

	/// The weighted random walk shared by both entry points.
	fn walk(
		&mut self,
		db: &WordDatabase,
		first: String,
		max_length: usize,
		min_length: usize,
	) -> Vec<String> {
		let valid_words = db.words().list_valid();
		let mut current = first.clone();
		let mut words = vec![first];

		while words.len() < max_length {
			let candidates = db.sequences().get_transitions(&current);
			let next = if candidates.is_empty() {
				// Dead end: restart from a uniform vocabulary draw.
				if valid_words.is_empty() {
					break;
				}
				valid_words[self.rng.random_range(0..valid_words.len())].clone()
			} else {
				let u: f64 = self.rng.random();
				match weighted_pick(&candidates, u) {
					Some(word) => word.to_owned(),
					None => break,
				}
			};

			words.push(next.clone());
			current = next;

			if words.len() >= min_length && self.rng.random::<f64>() < STOP_PROBABILITY {
				break;
			}
		}

		words
	}

	/// Scores a sentence for coherence against the learned transitions.
	///
	/// The sentence is case-folded, trimmed of leading/trailing punctuation
	/// and split on whitespace. Every adjacent pair the model knows adds its
	/// learned frequency; the sum is normalized by `word_count - 1`.
	///
	/// Quality boundaries: above 2 is `high`, above 1 is `medium`,
	/// otherwise `low` (`empty` when there are no words). Boundaries apply
	/// to the unrounded score.
	pub fn analyze_quality(&self, db: &WordDatabase, sentence: &str) -> SentenceQuality {
		let lowered = sentence.to_lowercase();
		let trimmed = lowered.trim_matches(|c: char| KEPT_PUNCTUATION.contains(&c));
		let words: Vec<&str> = trimmed.split_whitespace().collect();

		if words.is_empty() {
			return SentenceQuality {
				word_count: 0,
				avg_word_length: 0.0,
				coherence_score: 0.0,
				quality: "empty",
			};
		}

		let word_count = words.len();
		let avg_word_length =
			words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count as f64;

		let mut coherence = 0.0;
		for pair in words.windows(2) {
			let transitions = db.sequences().get_transitions(pair[0]);
			if let Some((_, frequency)) = transitions.iter().find(|(next, _)| next == pair[1]) {
				coherence += *frequency as f64;
			}
		}
		let coherence_score = if word_count > 1 {
			coherence / (word_count - 1) as f64
		} else {
			0.0
		};

		let quality = if coherence_score > 2.0 {
			"high"
		} else if coherence_score > 1.0 {
			"medium"
		} else {
			"low"
		};

		SentenceQuality {
			word_count,
			avg_word_length: round2(avg_word_length),
			coherence_score: round2(coherence_score),
			quality,
		}
	}

	/// Valid words that have at least one learned successor.
	///
	/// Useful to pick seeds that will not immediately fall back to a
	/// uniform restart.
	pub fn available_start_words(&self, db: &WordDatabase) -> Vec<String> {
		db.words()
			.list_valid()
			.into_iter()
			.filter(|word| !db.sequences().get_transitions(word).is_empty())
			.collect()
	}
}

/// Selects from frequency-ordered candidates using one uniform draw in [0, 1).
///
/// Walks the candidates accumulating probability mass (frequency over the
/// total); the first candidate whose cumulative probability reaches `u`
/// wins. If floating-point rounding exhausts the list, the last candidate
/// wins.
pub(crate) fn weighted_pick(candidates: &[(String, u64)], u: f64) -> Option<&str> {
	if candidates.is_empty() {
		return None;
	}

	let total: u64 = candidates.iter().map(|(_, frequency)| frequency).sum();
	if total == 0 {
		return None;
	}

	let mut cumulative = 0.0;
	for (word, frequency) in candidates {
		cumulative += *frequency as f64 / total as f64;
		if u <= cumulative {
			return Some(word);
		}
	}

	candidates.last().map(|(word, _)| word.as_str())
}

/// Joins walked words into the final sentence.
///
/// Single spaces between words, first character upper-cased, terminal
/// period appended.
fn finish_sentence(words: &[String]) -> String {
	let joined = words.join(" ");
	let mut chars = joined.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().collect::<String>() + chars.as_str() + ".",
		None => ".".to_owned(),
	}
}
