//! Text normalization and ingestion.
//!
//! The pipeline turns raw text into model updates in four steps: clean,
//! tokenize, derive n-grams, write to the stores. The raw input is logged
//! to the training-text record set before any derivation, so a partially
//! failed ingestion never loses the observation itself.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::store::WordDatabase;
use crate::store::word_store::{MIN_WORD_LEN, WordSource};

/// Punctuation kept by `clean` besides alphanumerics and whitespace.
pub(crate) const KEPT_PUNCTUATION: [char; 4] = ['.', ',', '!', '?'];

/// Counters reported after one `learn` call.
///
/// `sequences_stored` counts one per bigram and one per trigram, matching
/// the historical reporting convention even though each trigram performs
/// two transition writes.
#[derive(Serialize, Clone, Debug)]
pub struct LearnReport {
	pub words_learned: usize,
	pub sentences_processed: usize,
	pub bigrams_learned: usize,
	pub trigrams_learned: usize,
	pub sequences_stored: usize,
	/// Distinct learned tokens, sorted.
	pub unique_words: Vec<String>,
}

/// Complexity metrics for a raw input text.
#[derive(Serialize, Clone, Debug)]
pub struct TextComplexity {
	pub word_count: usize,
	pub sentence_count: usize,
	pub avg_words_per_sentence: f64,
	pub avg_word_length: f64,
	pub unique_words: usize,
	/// One of `empty`, `simple`, `medium`, `complex`.
	pub complexity: &'static str,
}

/// Rounds to 2 decimal places for reporting.
pub(crate) fn round2(value: f64) -> f64 {
	(value * 100.0).round() / 100.0
}

/// Cleans and normalizes text for processing.
///
/// Lower-cases, collapses every whitespace run to a single space, drops any
/// character that is not alphanumeric, whitespace or one of `. , ! ?`, and
/// trims the ends.
///
/// # Notes
/// - Collapsing happens before dropping, so a dropped character can leave
///   an interior double space behind. Downstream splitting is
///   whitespace-run based and absorbs those.
pub fn clean(text: &str) -> String {
	let lowered = text.to_lowercase();

	let mut collapsed = String::with_capacity(lowered.len());
	let mut in_whitespace = false;
	for c in lowered.chars() {
		if c.is_whitespace() {
			if !in_whitespace {
				collapsed.push(' ');
			}
			in_whitespace = true;
		} else {
			collapsed.push(c);
			in_whitespace = false;
		}
	}

	let kept: String = collapsed
		.chars()
		.filter(|c| c.is_alphanumeric() || *c == ' ' || KEPT_PUNCTUATION.contains(c))
		.collect();

	kept.trim().to_owned()
}

/// Extracts individual tokens from text.
///
/// Cleans, splits on whitespace, strips residual leading/trailing
/// punctuation per token and discards tokens shorter than `MIN_WORD_LEN`
/// characters.
pub fn tokenize(text: &str) -> Vec<String> {
	clean(text)
		.split_whitespace()
		.map(|token| token.trim_matches(|c: char| KEPT_PUNCTUATION.contains(&c)).to_owned())
		.filter(|token| token.chars().count() >= MIN_WORD_LEN)
		.collect()
}

/// Extracts sentences from text.
///
/// Cleans, splits on runs of `. ! ?` and discards blank segments.
pub fn extract_sentences(text: &str) -> Vec<String> {
	clean(text)
		.split(['.', '!', '?'])
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.map(str::to_owned)
		.collect()
}

/// Extracts overlapping n-grams with a sliding window of width `n`.
///
/// Empty when `n` is 0 or exceeds the token count.
pub fn extract_ngrams(tokens: &[String], n: usize) -> Vec<Vec<String>> {
	if n == 0 || n > tokens.len() {
		return Vec::new();
	}
	tokens.windows(n).map(<[String]>::to_vec).collect()
}

/// Processes a text and learns words and transitions from it.
///
/// # Behavior
/// 1. Appends the raw, unmodified text to the training log before any
///    parsing.
/// 2. Upserts every token as a valid word with source `TextLearning`.
/// 3. Records one transition per bigram.
/// 4. Flattens each trigram (w1, w2, w3) into the two transitions
///    (w1, w2) and (w2, w3), counting 1 toward `sequences_stored`.
///
/// # Notes
/// - Best-effort: a token rejected by the word store is skipped and logged,
///   never fatal; the reported counts cover only applied updates.
pub fn learn(db: &mut WordDatabase, text: &str) -> LearnReport {
	db.push_training_text(text);

	let tokens = tokenize(text);
	let sentences_processed = extract_sentences(text).len();
	let bigrams = extract_ngrams(&tokens, 2);
	let trigrams = extract_ngrams(&tokens, 3);

	let mut unique: BTreeSet<String> = BTreeSet::new();
	for token in &tokens {
		match db.words_mut().upsert(token, true, WordSource::TextLearning) {
			Ok(()) => {
				unique.insert(token.clone());
			}
			Err(e) => log::warn!("skipping token '{token}': {e}"),
		}
	}

	let mut sequences_stored = 0;
	for pair in &bigrams {
		db.sequences_mut().record_transition(&pair[0], &pair[1]);
		sequences_stored += 1;
	}

	// A trigram flattens into two adjacent transitions but counts once.
	for triple in &trigrams {
		db.sequences_mut().record_transition(&triple[0], &triple[1]);
		db.sequences_mut().record_transition(&triple[1], &triple[2]);
		sequences_stored += 1;
	}

	let unique_words: Vec<String> = unique.into_iter().collect();

	LearnReport {
		words_learned: unique_words.len(),
		sentences_processed,
		bigrams_learned: bigrams.len(),
		trigrams_learned: trigrams.len(),
		sequences_stored,
		unique_words,
	}
}

/// Occurrence count per token in a text.
pub fn word_frequency(text: &str) -> HashMap<String, usize> {
	let mut frequency = HashMap::new();
	for token in tokenize(text) {
		*frequency.entry(token).or_insert(0) += 1;
	}
	frequency
}

/// Tokens appearing at least `min_frequency` times, most frequent first.
///
/// Equal counts are ordered alphabetically so the result is deterministic.
pub fn common_words(text: &str, min_frequency: usize) -> Vec<(String, usize)> {
	let mut common: Vec<(String, usize)> = word_frequency(text)
		.into_iter()
		.filter(|(_, count)| *count >= min_frequency)
		.collect();

	common.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
	common
}

/// Analyzes the complexity of an input text.
///
/// Tier boundaries: `simple` below 4 average characters and 8 words per
/// sentence, `medium` below 6 and 15, otherwise `complex`; `empty` when the
/// text yields no tokens.
pub fn analyze_complexity(text: &str) -> TextComplexity {
	let words = tokenize(text);
	let sentences = extract_sentences(text);

	if words.is_empty() {
		return TextComplexity {
			word_count: 0,
			sentence_count: 0,
			avg_words_per_sentence: 0.0,
			avg_word_length: 0.0,
			unique_words: 0,
			complexity: "empty",
		};
	}

	let word_count = words.len();
	let sentence_count = sentences.len();
	let avg_words_per_sentence = if sentence_count > 0 {
		word_count as f64 / sentence_count as f64
	} else {
		0.0
	};
	let avg_word_length =
		words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count as f64;
	let unique_words = words.iter().collect::<HashSet<_>>().len();

	let complexity = if avg_word_length < 4.0 && avg_words_per_sentence < 8.0 {
		"simple"
	} else if avg_word_length < 6.0 && avg_words_per_sentence < 15.0 {
		"medium"
	} else {
		"complex"
	};

	TextComplexity {
		word_count,
		sentence_count,
		avg_words_per_sentence: round2(avg_words_per_sentence),
		avg_word_length: round2(avg_word_length),
		unique_words,
		complexity,
	}
}
