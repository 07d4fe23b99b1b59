//! Game service: binds the engine to the repository.

use derive_getters::Getters;
use mastermind_engine::{
    Attempt, Code, CodeGenerator, Color, EngineError, Game, GameStatus, Rules,
};
use tracing::{debug, info, instrument};

use crate::db::{DbError, GameRecord, GameRepository, NewGameRecord, TurnUpdate};

/// Error from a game service operation.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum ServiceError {
    /// No game with this id.
    #[display("Game {} not found", _0)]
    #[from(ignore)]
    GameNotFound(i32),

    /// The engine rejected the request.
    #[display("{}", _0)]
    Engine(EngineError),

    /// Storage failed.
    #[display("{}", _0)]
    Storage(DbError),
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::GameNotFound(_) => None,
            Self::Engine(e) => Some(e),
            Self::Storage(e) => Some(e),
        }
    }
}

impl From<diesel::result::Error> for ServiceError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::Storage(DbError::from(err))
    }
}

/// Row-level view of a game, as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameSummary {
    game_id: i32,
    status: GameStatus,
    attempts: u32,
    secret: Option<Code>,
}

impl GameSummary {
    #[instrument(skip(record), fields(game_id = record.id()))]
    fn from_record(record: &GameRecord) -> Result<Self, DbError> {
        let status = record.parse_status()?;
        let secret = if status.is_finished() {
            Some(record.parse_secret()?)
        } else {
            None
        };
        Ok(Self {
            game_id: *record.id(),
            status,
            attempts: record.attempt_count()?,
            secret,
        })
    }
}

/// A game with its full guess history.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameSnapshot {
    game_id: i32,
    game: Game,
}

/// Result of a scored guess.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GuessOutcome {
    game_id: i32,
    attempt: Attempt,
    status: GameStatus,
    secret: Option<Code>,
}

impl GuessOutcome {
    /// True when this guess ended the game.
    pub fn is_game_over(&self) -> bool {
        self.status.is_finished()
    }
}

/// Game operations over persistent storage.
///
/// Holds no game state itself: every call loads what it needs from the
/// repository and writes the result back.
#[derive(Debug, Clone)]
pub struct GameService {
    repository: GameRepository,
    generator: CodeGenerator,
}

impl GameService {
    /// Creates a service with the standard rules.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository) -> Self {
        Self::with_rules(repository, Rules::default())
    }

    /// Creates a service with custom rules.
    #[instrument(skip(repository))]
    pub fn with_rules(repository: GameRepository, rules: Rules) -> Self {
        info!(?rules, "Creating GameService");
        Self {
            repository,
            generator: CodeGenerator::new(rules),
        }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Rules applied to every game.
    pub fn rules(&self) -> &Rules {
        self.generator.rules()
    }

    /// Palette colors in play.
    pub fn colors(&self) -> Vec<Color> {
        Color::palette(self.rules().palette_size())
    }

    /// Starts a new game with a freshly generated secret.
    ///
    /// Any integer is a valid seed; negative seeds map onto the upper half
    /// of the generator's seed space, so distinct seeds stay distinct.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the game cannot be saved.
    #[instrument(skip(self))]
    pub fn create_game(&self, seed: Option<i64>) -> Result<GameSummary, ServiceError> {
        let secret = self
            .generator
            .generate(seed.map(|seed| u64::from_ne_bytes(seed.to_ne_bytes())));
        let game = Game::new(*self.rules(), secret);

        let record = self.repository.create_game(NewGameRecord::from_game(&game))?;
        info!(game_id = record.id(), seeded = seed.is_some(), "New game started");
        Ok(GameSummary::from_record(&record)?)
    }

    /// Lists every game, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] on storage failure.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<GameSummary>, ServiceError> {
        let games = self
            .repository
            .list_games()?
            .iter()
            .map(GameSummary::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = games.len(), "Games listed");
        Ok(games)
    }

    /// Loads a game with its guess history.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::GameNotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub fn get_game(&self, game_id: i32) -> Result<GameSnapshot, ServiceError> {
        let (record, guesses) = self
            .repository
            .find_game_with_guesses(game_id)?
            .ok_or(ServiceError::GameNotFound(game_id))?;
        let game = record.to_game(*self.rules(), &guesses)?;
        Ok(GameSnapshot { game_id, game })
    }

    /// Scores a guess given as color names and records it.
    ///
    /// Names are parsed first, then the engine validates and scores the
    /// guess. Nothing is written unless the guess is accepted.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::GameNotFound`] for an unknown id.
    /// - [`ServiceError::Engine`] with `UnknownColor`, `InvalidGuess` or
    ///   `GameAlreadyFinished`.
    /// - [`ServiceError::Storage`] on storage failure.
    #[instrument(skip(self, colors), fields(colors = ?colors))]
    pub fn submit_guess<S: AsRef<str> + std::fmt::Debug>(
        &self,
        game_id: i32,
        colors: &[S],
    ) -> Result<GuessOutcome, ServiceError> {
        let guess = Code::parse(colors)?;
        let rules = *self.rules();

        let outcome = self
            .repository
            .play_turn(game_id, |record, guesses| {
                let mut game = record.to_game(rules, guesses)?;
                let turn = game.advance(guess)?;
                let update = TurnUpdate::from_game(game_id, &game)?;

                let attempt = game
                    .last_attempt()
                    .cloned()
                    .ok_or_else(|| DbError::new("Scored guess missing from history"))?;
                debug!(attempt = turn.attempts, status = %turn.status, "Guess accepted");
                Ok::<_, ServiceError>((
                    update,
                    GuessOutcome {
                        game_id,
                        attempt,
                        status: turn.status,
                        secret: game.revealed_secret().cloned(),
                    },
                ))
            })?
            .ok_or(ServiceError::GameNotFound(game_id))?;

        if outcome.is_game_over() {
            info!(game_id, status = %outcome.status, attempts = outcome.attempt.number(), "Game finished");
        }
        Ok(outcome)
    }

    /// Deletes a game and its guesses.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::GameNotFound`] for an unknown id.
    #[instrument(skip(self))]
    pub fn delete_game(&self, game_id: i32) -> Result<(), ServiceError> {
        if !self.repository.delete_game(game_id)? {
            return Err(ServiceError::GameNotFound(game_id));
        }
        info!(game_id, "Game deleted");
        Ok(())
    }
}
