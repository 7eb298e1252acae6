use std::fmt;

/// Errors produced by the word-learning core.
///
/// # Variants
/// - `Validation`: input rejected before any store mutation.
/// - `Persistence`: snapshot I/O or serialization failure.
/// - `NotFound`: a requested word is unknown to the vocabulary, or marked invalid.
///
/// # Notes
/// - Nothing here is fatal: every variant is recoverable by the caller
///   (retry, log, or surface to the user).
#[derive(Debug)]
pub enum LexiconError {
	/// Input rejected before any store mutation.
	Validation {
		/// Description of what is wrong with the input.
		reason: String,
	},

	/// Storage failure while reading or writing a snapshot.
	Persistence {
		/// Operation being performed when the failure occurred.
		operation: &'static str,
		/// Underlying I/O or serialization error.
		source: Box<dyn std::error::Error + Send + Sync>,
	},

	/// The requested word is not in the vocabulary, or is marked invalid.
	NotFound {
		/// The word that was looked up.
		word: String,
	},
}

impl LexiconError {
	/// Creates a validation error.
	pub(crate) fn validation(reason: impl Into<String>) -> Self {
		Self::Validation { reason: reason.into() }
	}

	/// Wraps an I/O or serialization failure with the operation it interrupted.
	pub(crate) fn persistence<E>(operation: &'static str, source: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		Self::Persistence { operation, source: Box::new(source) }
	}

	/// Creates a not-found error for the given word.
	pub(crate) fn not_found(word: &str) -> Self {
		Self::NotFound { word: word.to_owned() }
	}
}

impl fmt::Display for LexiconError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Validation { reason } => {
				write!(f, "Invalid word: {reason}")
			}
			Self::Persistence { operation, source } => {
				write!(f, "Storage failure during {operation}: {source}")
			}
			Self::NotFound { word } => {
				write!(f, "Word '{word}' not found in learned words.")
			}
		}
	}
}

impl std::error::Error for LexiconError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Persistence { source, .. } => Some(source.as_ref()),
			_ => None,
		}
	}
}
