//! Database persistence for games and guesses.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{GameRecord, GuessRecord, NewGameRecord, NewGuessRecord, TurnUpdate};
pub use repository::{GameRepository, MIGRATIONS};
