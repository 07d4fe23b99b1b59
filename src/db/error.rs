//! Storage failures for game and guess rows.
//!
//! Everything the repository can hit ends up here: an unreachable database
//! file, a failed migration, a rolled-back turn, or a stored row whose
//! secret, guess or status no longer decodes into engine values.

use derive_more::{Display, Error};
use mastermind_engine::EngineError;
use tracing::instrument;

/// A storage failure, tagged with where in this crate it was raised.
#[derive(Debug, Clone, Display, Error)]
#[display("Database error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// What went wrong, including the game id when one is known.
    pub message: String,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl DbError {
    /// Records `message` at the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection error: {}", err))
    }
}

// Rows are written by this crate only, so a value that fails to decode is
// corrupt storage rather than a bad request.
impl From<EngineError> for DbError {
    #[track_caller]
    fn from(err: EngineError) -> Self {
        Self::new(format!("Corrupt game record: {}", err))
    }
}
