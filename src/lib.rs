//! Mastermind game server.
//!
//! The game rules live in the [`mastermind_engine`] crate. This crate adds
//! everything needed to play them over the network.
//!
//! # Architecture
//!
//! - **Database**: games and guesses persisted with Diesel on SQLite
//! - **Service**: loads a game, runs one engine turn, writes it back atomically
//! - **API**: axum REST endpoints over the service
//! - **Client**: typed reqwest client for the REST API
//!
//! # Example
//!
//! ```no_run
//! use mastermind::{GameRepository, GameService};
//!
//! # fn example() -> anyhow::Result<()> {
//! let repository = GameRepository::new("mastermind.db".to_string())?;
//! repository.run_migrations()?;
//!
//! let service = GameService::new(repository);
//! let game = service.create_game(Some(42))?;
//! let outcome = service.submit_guess(
//!     *game.game_id(),
//!     &["red", "blue", "green", "yellow", "purple", "orange"],
//! )?;
//! println!("{} exact", outcome.attempt().tally().exact());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod client;
mod config;
mod db;
mod server;
mod service;

// Crate-level exports - REST API
pub use api::{
    ApiError, AppState, CreateGameRequest, CreateGameResponse, ErrorResponse,
    GameStateResponse, GameSummaryResponse, GuessHistoryItem, MakeGuessRequest,
    MakeGuessResponse, color_names, router,
};

// Crate-level exports - HTTP client
pub use client::MastermindClient;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Database persistence
pub use db::{
    DbError, GameRecord, GameRepository, GuessRecord, MIGRATIONS, NewGameRecord,
    NewGuessRecord, TurnUpdate,
};

// Crate-level exports - Server
pub use server::{app, open_service, run};

// Crate-level exports - Game service
pub use service::{GameService, GameSnapshot, GameSummary, GuessOutcome, ServiceError};

// Crate-level exports - Engine types
pub use mastermind_engine::{
    Attempt, Code, CodeGenerator, Color, EngineError, Game, GameStatus, MatchKind, Rules,
    ScoreTally,
};
