//! End-to-end generation against a learned model.

use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_lex_core::error::LexiconError;
use rs_lex_core::generator::{EMPTY_VOCABULARY_MESSAGE, SentenceGenerator};
use rs_lex_core::processor;
use rs_lex_core::store::WordDatabase;
use rs_lex_core::store::word_store::WordSource;

fn learned_db() -> WordDatabase {
	let mut db = WordDatabase::new();
	processor::learn(
		&mut db,
		"The quick brown fox jumps over the lazy dog. The lazy dog barks at the quick fox.",
	);
	db
}

#[test]
fn generated_sentences_are_capitalized_and_terminated() {
	let db = learned_db();
	let mut generator = SentenceGenerator::with_rng(StdRng::seed_from_u64(3));

	for _ in 0..20 {
		let sentence = generator.generate(&db, 15, 3);
		let first = sentence.chars().next().expect("non-empty sentence");

		assert!(first.is_uppercase(), "got '{sentence}'");
		assert!(sentence.ends_with('.'), "got '{sentence}'");
		assert!(sentence.split_whitespace().count() <= 15, "got '{sentence}'");
	}
}

#[test]
fn generation_is_reproducible_under_the_same_seed() {
	let db = learned_db();

	let mut left = SentenceGenerator::with_rng(StdRng::seed_from_u64(99));
	let mut right = SentenceGenerator::with_rng(StdRng::seed_from_u64(99));

	for _ in 0..10 {
		assert_eq!(left.generate(&db, 12, 3), right.generate(&db, 12, 3));
	}
}

#[test]
fn empty_vocabulary_yields_the_sentinel_not_an_error() {
	let db = WordDatabase::new();
	let mut generator = SentenceGenerator::with_rng(StdRng::seed_from_u64(1));

	assert_eq!(generator.generate(&db, 15, 3), EMPTY_VOCABULARY_MESSAGE);
}

#[test]
fn unknown_seed_is_reported_not_substituted() {
	let db = learned_db();
	let mut generator = SentenceGenerator::with_rng(StdRng::seed_from_u64(1));

	let err = generator.generate_from_seed(&db, "neverlearned", 10, 3).unwrap_err();
	assert!(matches!(err, LexiconError::NotFound { .. }));
	assert_eq!(
		err.to_string(),
		"Word 'neverlearned' not found in learned words."
	);
}

#[test]
fn seeded_generation_starts_with_the_seed() {
	let db = learned_db();
	let mut generator = SentenceGenerator::with_rng(StdRng::seed_from_u64(5));

	for _ in 0..10 {
		let sentence = generator.generate_from_seed(&db, "lazy", 10, 3).unwrap();
		assert!(sentence.starts_with("Lazy"), "got '{sentence}'");
	}
}

#[test]
fn weighted_walks_prefer_frequent_transitions() {
	// One step from "aa": "xx" observed 3 times, "yy" once.
	let mut db = WordDatabase::new();
	db.words_mut().upsert("aa", true, WordSource::TextLearning).unwrap();
	for _ in 0..3 {
		db.sequences_mut().record_transition("aa", "xx");
	}
	db.sequences_mut().record_transition("aa", "yy");

	let mut generator = SentenceGenerator::with_rng(StdRng::seed_from_u64(11));
	let mut xx = 0;
	let mut yy = 0;
	let rounds = 4_000;
	for _ in 0..rounds {
		let sentence = generator.generate_from_seed(&db, "aa", 2, 2).unwrap();
		match sentence.as_str() {
			"Aa xx." => xx += 1,
			"Aa yy." => yy += 1,
			other => panic!("unexpected sentence '{other}'"),
		}
	}

	assert_eq!(xx + yy, rounds);
	let share = f64::from(xx) / f64::from(rounds);
	assert!((0.70..=0.80).contains(&share), "xx share was {share}");
}

#[test]
fn dead_ends_restart_instead_of_terminating() {
	// "solo" has no successors; the walk must still reach the cap by
	// restarting from the vocabulary.
	let mut db = WordDatabase::new();
	db.words_mut().upsert("solo", true, WordSource::TextLearning).unwrap();

	let mut generator = SentenceGenerator::with_rng(StdRng::seed_from_u64(2));
	let sentence = generator.generate_from_seed(&db, "solo", 4, 4).unwrap();

	assert_eq!(sentence, "Solo solo solo solo.");
}
