//! Request and response bodies of the REST API.
//!
//! Shared by the server handlers and [`MastermindClient`](crate::MastermindClient).
//! Field names are camelCase on the wire.

use mastermind_engine::{Attempt, Code, Color, GameStatus};
use serde::{Deserialize, Serialize};

use crate::service::{GameSnapshot, GameSummary, GuessOutcome};

/// Body of `POST /api/games`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    /// Seed for a reproducible secret code.
    #[serde(default)]
    pub seed: Option<i64>,
}

/// Response of `POST /api/games`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    /// Id of the new game.
    pub game_id: i32,
    /// Always `IN_PROGRESS`.
    pub status: GameStatus,
    /// Always 0.
    pub attempts: u32,
}

impl From<&GameSummary> for CreateGameResponse {
    fn from(summary: &GameSummary) -> Self {
        Self {
            game_id: *summary.game_id(),
            status: *summary.status(),
            attempts: *summary.attempts(),
        }
    }
}

/// One entry of `GET /api/games`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummaryResponse {
    /// Game id.
    pub game_id: i32,
    /// Current status.
    pub status: GameStatus,
    /// Guesses made so far.
    pub attempts: u32,
    /// Secret code, only once the game is finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_code: Option<Vec<String>>,
}

impl From<&GameSummary> for GameSummaryResponse {
    fn from(summary: &GameSummary) -> Self {
        Self {
            game_id: *summary.game_id(),
            status: *summary.status(),
            attempts: *summary.attempts(),
            secret_code: summary.secret().as_ref().map(Code::names),
        }
    }
}

/// A past guess inside [`GameStateResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessHistoryItem {
    /// Guessed color names.
    pub guess: Vec<String>,
    /// Slots with the right color in the right place.
    pub exact_matches: usize,
    /// Slots whose color is elsewhere in the secret.
    pub position_matches: usize,
    /// Slots that matched nothing.
    pub no_matches: usize,
    /// 1-based attempt number.
    pub attempt_number: u32,
}

impl From<&Attempt> for GuessHistoryItem {
    fn from(attempt: &Attempt) -> Self {
        Self {
            guess: attempt.guess().names(),
            exact_matches: attempt.tally().exact(),
            position_matches: attempt.tally().position(),
            no_matches: attempt.tally().none(),
            attempt_number: attempt.number(),
        }
    }
}

/// Response of `GET /api/games/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateResponse {
    /// Game id.
    pub game_id: i32,
    /// Current status.
    pub status: GameStatus,
    /// Guesses made so far.
    pub attempts: u32,
    /// Guesses in attempt order.
    pub guess_history: Vec<GuessHistoryItem>,
    /// Secret code, only once the game is finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_code: Option<Vec<String>>,
}

impl From<&GameSnapshot> for GameStateResponse {
    fn from(snapshot: &GameSnapshot) -> Self {
        let game = snapshot.game();
        Self {
            game_id: *snapshot.game_id(),
            status: game.status(),
            attempts: game.attempts(),
            guess_history: game.history().iter().map(GuessHistoryItem::from).collect(),
            secret_code: game.revealed_secret().map(Code::names),
        }
    }
}

/// Body of `POST /api/games/{id}/guesses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeGuessRequest {
    /// Color names, case-insensitive.
    pub colors: Vec<String>,
}

/// Response of `POST /api/games/{id}/guesses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeGuessResponse {
    /// Game id.
    pub game_id: i32,
    /// Canonical names of the guessed colors.
    pub guess: Vec<String>,
    /// Slots with the right color in the right place.
    pub exact_matches: usize,
    /// Slots whose color is elsewhere in the secret.
    pub position_matches: usize,
    /// Slots that matched nothing.
    pub no_matches: usize,
    /// 1-based attempt number of this guess.
    pub attempt_number: u32,
    /// Status after this guess.
    pub game_status: GameStatus,
    /// True when this guess ended the game.
    pub is_game_over: bool,
    /// Secret code, only when this guess ended the game.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_code: Option<Vec<String>>,
}

impl From<&GuessOutcome> for MakeGuessResponse {
    fn from(outcome: &GuessOutcome) -> Self {
        let attempt = outcome.attempt();
        Self {
            game_id: *outcome.game_id(),
            guess: attempt.guess().names(),
            exact_matches: attempt.tally().exact(),
            position_matches: attempt.tally().position(),
            no_matches: attempt.tally().none(),
            attempt_number: attempt.number(),
            game_status: *outcome.status(),
            is_game_over: outcome.is_game_over(),
            secret_code: outcome.secret().as_ref().map(Code::names),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error kind, e.g. `GameNotFound`.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

/// Palette names for `GET /api/colors`.
pub fn color_names(colors: &[Color]) -> Vec<String> {
    colors.iter().map(|c| c.name().to_string()).collect()
}
