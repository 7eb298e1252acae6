use rs_lex_core::generator::SentenceGenerator;
use rs_lex_core::processor;
use rs_lex_core::store::WordDatabase;
use rs_lex_core::store::word_store::WordSource;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Start from an empty database (no snapshot on disk yet)
    let mut db = WordDatabase::new();

    // Learn from a training text: every token becomes a valid word and
    // every adjacency feeds the transition-frequency table
    let report = processor::learn(
        &mut db,
        "The quick brown fox jumps over the lazy dog. \
         The lazy dog dreams about the quick fox. \
         Dreams make the dog bark at the fox!",
    );
    println!("Words learned: {}", report.words_learned);
    println!("Sentences processed: {}", report.sentences_processed);
    println!("Sequences stored: {}", report.sequences_stored);
    println!("Unique words: {:?}", report.unique_words);

    // Record manual guessing feedback: the player judged 'flurp' not to be
    // a real word and 'quick' to be one
    db.words_mut().upsert("flurp", false, WordSource::Guessing)?;
    db.words_mut().upsert("quick", true, WordSource::Guessing)?;

    // Words shorter than 2 characters are rejected before any write
    match db.words_mut().upsert("x", true, WordSource::Guessing) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected as expected: {e}"),
    }

    // Generate sentences by weighted random walk over the learned chain
    let mut generator = SentenceGenerator::new();
    for i in 0..5 {
        println!("Generated sentence {}: {}", i + 1, generator.generate(&db, 15, 3));
    }

    // Seeded generation starts from a chosen word instead of a random one
    println!("Seeded: {}", generator.generate_from_seed(&db, "dog", 10, 3)?);

    // An unknown seed is reported, never silently replaced
    match generator.generate_from_seed(&db, "unknownword", 10, 3) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Seed rejected as expected: {e}"),
    }

    // Words that can start a walk without an immediate restart
    println!("Available start words: {:?}", generator.available_start_words(&db));

    // Score a sentence for coherence against the learned transitions
    let quality = generator.analyze_quality(&db, "The quick brown fox.");
    println!(
        "Quality: {} words, coherence {}, tier '{}'",
        quality.word_count, quality.coherence_score, quality.quality
    );

    // Complexity analysis of raw text, without learning from it
    let complexity = processor::analyze_complexity("We read. We write. We learn every day.");
    println!(
        "Complexity: {} words over {} sentences, tier '{}'",
        complexity.word_count, complexity.sentence_count, complexity.complexity
    );

    // Frequent tokens of a text
    println!(
        "Common words: {:?}",
        processor::common_words("the fox and the dog and the moon", 2)
    );

    // Snapshot the whole model and load it back
    let snapshot = std::env::temp_dir().join("rs-lex-exemple.db");
    db.save(&snapshot)?;
    let reloaded = WordDatabase::open(&snapshot)?;
    println!("Reloaded statistics: {:?}", reloaded.statistics());

    // Clear every record set; statistics drop to zero
    db.clear_all();
    println!("After clear: {:?}", db.statistics());

    Ok(())
}
