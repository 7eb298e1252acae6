use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, delete, get, middleware, put, web};

use rs_lex_core::error::LexiconError;
use rs_lex_core::generator::SentenceGenerator;
use rs_lex_core::processor;
use rs_lex_core::store::WordDatabase;
use rs_lex_core::store::word_store::WordSource;
use serde::Deserialize;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	max_length: Option<usize>,
	min_length: Option<usize>,
	seed: Option<String>,
}

/// Struct representing query parameters for the `/v1/analyze` endpoint
#[derive(Deserialize)]
struct AnalyzeParams {
	sentence: String,
}

/// Struct representing query parameters for the `/v1/complexity` endpoint
#[derive(Deserialize)]
struct ComplexityParams {
	text: String,
}

/// Struct representing query parameters for the `/v1/words` endpoint
#[derive(Deserialize)]
struct WordParams {
	word: String,
	valid: bool,
}

struct SharedData {
	db: WordDatabase,
	snapshot_path: PathBuf,
}

impl SharedData {
	/// Persists the current state. Every mutating endpoint calls this after
	/// its change so a restart never loses learned data.
	fn save(&self) -> Result<(), LexiconError> {
		self.db.save(&self.snapshot_path)
	}
}

/// HTTP PUT endpoint `/v1/learn`
///
/// Learns words and transitions from the raw request body. Ingestion can be
/// large, so it runs on the blocking thread pool and the report comes back
/// asynchronously; the HTTP workers stay responsive meanwhile.
#[put("/v1/learn")]
async fn put_learn(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let result = web::block(move || {
		let mut shared_data = match data.lock() {
			Ok(m) => m,
			Err(_) => return Err("Database lock failed".to_owned()),
		};
		let report = processor::learn(&mut shared_data.db, &body);
		shared_data.save().map_err(|e| e.to_string())?;
		Ok(report)
	})
	.await;

	match result {
		Ok(Ok(report)) => HttpResponse::Ok().json(report),
		Ok(Err(e)) => HttpResponse::InternalServerError().body(e),
		Err(_) => HttpResponse::InternalServerError().body("Ingestion task failed"),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a sentence by weighted random walk. With a `seed` parameter the
/// walk starts from that word and a missing or invalid seed is a 404; without
/// one the start is a uniform draw over the valid vocabulary.
#[get("/v1/generate")]
async fn get_generate(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	let max_length = query.max_length.unwrap_or(15);
	let min_length = query.min_length.unwrap_or(3);

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Database lock failed"),
	};

	let mut generator = SentenceGenerator::new();
	match &query.seed {
		Some(seed) => {
			match generator.generate_from_seed(&shared_data.db, seed, max_length, min_length) {
				Ok(sentence) => HttpResponse::Ok().body(sentence),
				Err(e) => HttpResponse::NotFound().body(e.to_string()),
			}
		}
		None => HttpResponse::Ok().body(generator.generate(&shared_data.db, max_length, min_length)),
	}
}

/// HTTP GET endpoint `/v1/analyze`
///
/// Scores a sentence for coherence against the learned transitions.
#[get("/v1/analyze")]
async fn get_analyze(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<AnalyzeParams>,
) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Database lock failed"),
	};

	let generator = SentenceGenerator::new();
	HttpResponse::Ok().json(generator.analyze_quality(&shared_data.db, &query.sentence))
}

/// HTTP GET endpoint `/v1/complexity`
///
/// Analyzes the complexity of an arbitrary text without learning from it.
#[get("/v1/complexity")]
async fn get_complexity(query: web::Query<ComplexityParams>) -> impl Responder {
	HttpResponse::Ok().json(processor::analyze_complexity(&query.text))
}

/// HTTP PUT endpoint `/v1/words`
///
/// Records manual-guessing feedback for a candidate word. The word enters
/// the vocabulary with `Guessing` provenance, replacing any previous entry.
#[put("/v1/words")]
async fn put_word(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<WordParams>,
) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Database lock failed"),
	};

	match shared_data.db.words_mut().upsert(&query.word, query.valid, WordSource::Guessing) {
		Ok(()) => (),
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	}

	match shared_data.save() {
		Ok(()) => HttpResponse::Ok().body("Word recorded"),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/statistics`
///
/// Read-only aggregation over all record sets; safe alongside any other call.
#[get("/v1/statistics")]
async fn get_statistics(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Database lock failed"),
	};
	HttpResponse::Ok().json(shared_data.db.statistics())
}

/// HTTP DELETE endpoint `/v1/clear`
///
/// Deletes every row from all three record sets. Irreversible.
#[delete("/v1/clear")]
async fn delete_clear(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Database lock failed"),
	};

	shared_data.db.clear_all();
	match shared_data.save() {
		Ok(()) => HttpResponse::Ok().body("All learned data cleared"),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// Main entry point for the server.
///
/// Loads the database snapshot, wraps it in a `Mutex` for thread safety,
/// and starts an Actix-web HTTP server exposing the learning, generation
/// and statistics endpoints.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Currently, the snapshot path is hardcoded and should be made configurable.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let snapshot_path = PathBuf::from("./data/lexicon.db");
	let db = match WordDatabase::open(&snapshot_path) {
		Ok(db) => db,
		Err(e) => {
			log::error!("Failed to load snapshot: {e}");
			return Err(std::io::Error::other(e.to_string()));
		}
	};

	let shared_data = web::Data::new(Mutex::new(SharedData { db, snapshot_path }));

	HttpServer::new(move || {
		App::new()
			.app_data(shared_data.clone())
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.service(put_learn)
			.service(get_generate)
			.service(get_analyze)
			.service(get_complexity)
			.service(put_word)
			.service(get_statistics)
			.service(delete_clear)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
