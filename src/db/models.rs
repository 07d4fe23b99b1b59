//! Database models and their mapping to engine types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use mastermind_engine::{Attempt, Code, Game, GameStatus, Rules, ScoreTally};
use tracing::instrument;

use crate::db::{DbError, schema};

/// Stored game row.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRecord {
    id: i32,
    secret_code: String,
    attempts: i32,
    status: String,
    created_at: NaiveDateTime,
}

impl GameRecord {
    /// Parses the stored status string.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the column holds an unknown status.
    #[instrument(skip(self), fields(game_id = self.id, status = %self.status))]
    pub fn parse_status(&self) -> Result<GameStatus, DbError> {
        self.status
            .parse()
            .map_err(|_| DbError::new(format!("Invalid status: '{}'", self.status)))
    }

    /// Decodes the stored secret code.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a stored color name is unknown.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn parse_secret(&self) -> Result<Code, DbError> {
        Ok(Code::from_storage(&self.secret_code)?)
    }

    /// Stored attempt counter.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the counter is negative.
    pub fn attempt_count(&self) -> Result<u32, DbError> {
        u32::try_from(self.attempts)
            .map_err(|_| DbError::new(format!("Negative attempt count: {}", self.attempts)))
    }

    /// Rebuilds the engine game from this row and its guesses.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if any stored value fails to decode.
    #[instrument(skip(self, guesses), fields(game_id = self.id, guesses = guesses.len()))]
    pub fn to_game(&self, rules: Rules, guesses: &[GuessRecord]) -> Result<Game, DbError> {
        let history = guesses
            .iter()
            .map(GuessRecord::to_attempt)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Game::restore(
            rules,
            self.parse_secret()?,
            self.attempt_count()?,
            history,
            self.parse_status()?,
        ))
    }
}

/// Insertable game row.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    secret_code: String,
    attempts: i32,
    status: String,
}

impl NewGameRecord {
    /// Row for a freshly created game.
    #[instrument(skip(game))]
    pub fn from_game(game: &Game) -> Self {
        Self::new(
            game.secret().to_storage(),
            game.attempts() as i32,
            game.status().to_string(),
        )
    }
}

/// Stored guess row.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::game_guesses)]
#[diesel(belongs_to(GameRecord, foreign_key = game_id))]
pub struct GuessRecord {
    id: i32,
    game_id: i32,
    guess_code: String,
    exact_matches: i32,
    position_matches: i32,
    no_matches: i32,
    attempt_number: i32,
}

impl GuessRecord {
    /// Decodes the row into an engine attempt.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the guess or any count fails to decode.
    #[instrument(skip(self), fields(guess_id = self.id, attempt = self.attempt_number))]
    pub fn to_attempt(&self) -> Result<Attempt, DbError> {
        let count = |value: i32| {
            usize::try_from(value).map_err(|_| DbError::new(format!("Negative count: {value}")))
        };
        let tally = ScoreTally::new(
            count(self.exact_matches)?,
            count(self.position_matches)?,
            count(self.no_matches)?,
        );
        let number = u32::try_from(self.attempt_number).map_err(|_| {
            DbError::new(format!("Invalid attempt number: {}", self.attempt_number))
        })?;
        Ok(Attempt::new(
            Code::from_storage(&self.guess_code)?,
            tally,
            number,
        ))
    }
}

/// Insertable guess row.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::game_guesses)]
pub struct NewGuessRecord {
    game_id: i32,
    guess_code: String,
    exact_matches: i32,
    position_matches: i32,
    no_matches: i32,
    attempt_number: i32,
}

impl NewGuessRecord {
    /// Row for an attempt of the given game.
    #[instrument(skip(attempt), fields(attempt = attempt.number()))]
    pub fn from_attempt(game_id: i32, attempt: &Attempt) -> Self {
        let tally = attempt.tally();
        Self::new(
            game_id,
            attempt.guess().to_storage(),
            tally.exact() as i32,
            tally.position() as i32,
            tally.none() as i32,
            attempt.number() as i32,
        )
    }
}

/// Changes to write back after a guess has been scored.
#[derive(Debug, Clone, new, Getters)]
pub struct TurnUpdate {
    attempts: i32,
    status: String,
    guess: NewGuessRecord,
}

impl TurnUpdate {
    /// Captures the game's new counter and status plus its latest attempt.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the game has no attempts to record.
    #[instrument(skip(game))]
    pub fn from_game(game_id: i32, game: &Game) -> Result<Self, DbError> {
        let attempt = game
            .last_attempt()
            .ok_or_else(|| DbError::new("No attempt to record"))?;
        Ok(Self::new(
            game.attempts() as i32,
            game.status().to_string(),
            NewGuessRecord::from_attempt(game_id, attempt),
        ))
    }
}
