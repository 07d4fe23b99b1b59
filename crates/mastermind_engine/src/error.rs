//! Engine error types.

use crate::GameStatus;

/// Error raised by the Mastermind engine.
///
/// Every failure is reported to the caller; the engine never retries and
/// never panics on bad input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// A color name outside the palette.
    #[display("Unknown color: '{}'", _0)]
    UnknownColor(String),

    /// A guess of the wrong length or containing colors outside the palette.
    #[display("Invalid guess: {}", _0)]
    InvalidGuess(String),

    /// A guess was submitted after the game ended.
    #[display("Game is already finished ({})", _0)]
    GameAlreadyFinished(GameStatus),

    /// Rules that cannot produce a valid game.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),
}

impl std::error::Error for EngineError {}

impl EngineError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownColor(_) => "UnknownColor",
            Self::InvalidGuess(_) => "InvalidGuess",
            Self::GameAlreadyFinished(_) => "GameAlreadyFinished",
            Self::InvalidConfiguration(_) => "InvalidConfiguration",
        }
    }
}
