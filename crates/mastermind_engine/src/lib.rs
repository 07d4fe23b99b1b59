//! Pure Mastermind game logic.
//!
//! - [`CodeGenerator`] draws a secret of distinct colors, optionally seeded.
//! - [`evaluate`] scores a guess slot by slot into a [`ScoreTally`].
//! - [`Game`] applies guesses, tracks attempts and decides [`GameStatus`].
//!
//! Nothing here performs I/O or holds state between calls. Storage of games
//! is the caller's concern.
//!
//! ```
//! use mastermind_engine::{Code, CodeGenerator, Game, GameStatus, Rules};
//!
//! let rules = Rules::default();
//! let secret = CodeGenerator::new(rules).generate(Some(42));
//! let mut game = Game::new(rules, secret.clone());
//!
//! let turn = game.advance(secret).unwrap();
//! assert_eq!(turn.status, GameStatus::Won);
//! assert_eq!(turn.tally.exact(), 6);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod code;
mod color;
mod error;
mod evaluate;
mod game;
mod generator;
mod rules;
mod validation;

pub use code::{Code, STORAGE_DELIMITER};
pub use color::{Color, PALETTE_SIZE};
pub use error::EngineError;
pub use evaluate::{MatchKind, ScoreTally, classify, evaluate};
pub use game::{Attempt, Game, GameStatus, Turn};
pub use generator::{CodeGenerator, generate};
pub use rules::{CODE_LENGTH, MAX_ATTEMPTS, Rules};
pub use validation::{check_guess, is_valid_guess};
