//! Game state machine.
//!
//! A [`Game`] is a plain value. Callers load it from storage, call
//! [`Game::advance`] once per guess, and persist the new attempt together
//! with the updated counter and status.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{check_guess, evaluate, Code, EngineError, Rules, ScoreTally};

/// Lifecycle state of a game.
///
/// Moves only forward: `InProgress` to `Won` or `InProgress` to `Lost`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// Guesses are still accepted.
    #[default]
    InProgress,
    /// The secret was guessed.
    Won,
    /// The attempt budget ran out.
    Lost,
}

impl GameStatus {
    /// True for `Won` and `Lost`.
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Status after a scored guess.
    #[instrument]
    pub fn determine(tally: &ScoreTally, attempts: u32, rules: &Rules) -> Self {
        if tally.exact() == rules.code_length() {
            Self::Won
        } else if attempts >= rules.max_attempts() {
            Self::Lost
        } else {
            Self::InProgress
        }
    }
}

/// One scored guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    guess: Code,
    tally: ScoreTally,
    number: u32,
}

impl Attempt {
    /// Creates an attempt record.
    pub fn new(guess: Code, tally: ScoreTally, number: u32) -> Self {
        Self {
            guess,
            tally,
            number,
        }
    }

    /// The submitted guess.
    pub fn guess(&self) -> &Code {
        &self.guess
    }

    /// The score it received.
    pub fn tally(&self) -> &ScoreTally {
        &self.tally
    }

    /// 1-based attempt number.
    pub fn number(&self) -> u32 {
        self.number
    }
}

/// Result of a successful [`Game::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Score of the guess.
    pub tally: ScoreTally,
    /// Status after the guess.
    pub status: GameStatus,
    /// Attempt count after the guess, also the new attempt's number.
    pub attempts: u32,
}

impl Turn {
    /// True when this turn ended the game.
    pub fn is_game_over(&self) -> bool {
        self.status.is_finished()
    }
}

/// A Mastermind game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    rules: Rules,
    secret: Code,
    attempts: u32,
    history: Vec<Attempt>,
    status: GameStatus,
}

impl Game {
    /// Starts a game for an already generated secret.
    #[instrument(skip(secret))]
    pub fn new(rules: Rules, secret: Code) -> Self {
        debug!("New game");
        Self {
            rules,
            secret,
            attempts: 0,
            history: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    /// Rebuilds a game from stored parts.
    ///
    /// `history` is sorted by attempt number.
    #[instrument(skip(secret, history), fields(history_len = history.len()))]
    pub fn restore(
        rules: Rules,
        secret: Code,
        attempts: u32,
        mut history: Vec<Attempt>,
        status: GameStatus,
    ) -> Self {
        history.sort_by_key(Attempt::number);
        Self {
            rules,
            secret,
            attempts,
            history,
            status,
        }
    }

    /// Scores `guess`, records it and updates the status.
    ///
    /// On error the game is left untouched.
    ///
    /// # Errors
    ///
    /// - [`EngineError::GameAlreadyFinished`] if the game is won or lost.
    /// - [`EngineError::InvalidGuess`] if the guess has the wrong length or
    ///   uses colors outside the palette.
    #[instrument(skip(self, guess), fields(attempts = self.attempts, guess = %guess))]
    pub fn advance(&mut self, guess: Code) -> Result<Turn, EngineError> {
        if self.status.is_finished() {
            return Err(EngineError::GameAlreadyFinished(self.status));
        }
        check_guess(&guess, &self.rules)?;

        let tally = evaluate(&self.secret, &guess);
        let attempts = self.attempts + 1;
        let status = GameStatus::determine(&tally, attempts, &self.rules);

        self.history.push(Attempt::new(guess, tally, attempts));
        self.attempts = attempts;
        self.status = status;

        info!(attempt = attempts, tally = %tally, status = %status, "Guess scored");
        Ok(Turn {
            tally,
            status,
            attempts,
        })
    }

    /// The rules in force.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of scored guesses.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Scored guesses in attempt order.
    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    /// Most recent attempt.
    pub fn last_attempt(&self) -> Option<&Attempt> {
        self.history.last()
    }

    /// Guesses left before the game is lost.
    pub fn remaining_attempts(&self) -> u32 {
        self.rules.max_attempts().saturating_sub(self.attempts)
    }

    /// The secret, only once the game is finished.
    pub fn revealed_secret(&self) -> Option<&Code> {
        self.status.is_finished().then_some(&self.secret)
    }

    /// The secret regardless of status. For storage, not for players.
    pub fn secret(&self) -> &Code {
        &self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color::*;
    use std::str::FromStr;

    fn secret() -> Code {
        Code::new(vec![Red, Blue, Green, Yellow, Purple, Orange])
    }

    fn miss() -> Code {
        Code::new(vec![Pink, Brown, Silver, Black, Pink, Brown])
    }

    #[test]
    fn test_new_game() {
        let game = Game::new(Rules::default(), secret());
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.attempts(), 0);
        assert!(game.history().is_empty());
        assert_eq!(game.revealed_secret(), None);
        assert_eq!(game.remaining_attempts(), 20);
    }

    #[test]
    fn test_winning_guess() {
        let mut game = Game::new(Rules::default(), secret());
        let turn = game.advance(secret()).unwrap();
        assert_eq!(turn.status, GameStatus::Won);
        assert_eq!(turn.attempts, 1);
        assert!(turn.is_game_over());
        assert_eq!(game.revealed_secret(), Some(&secret()));
    }

    #[test]
    fn test_losing_on_last_attempt() {
        let mut game = Game::new(Rules::default(), secret());
        for n in 1..20 {
            let turn = game.advance(miss()).unwrap();
            assert_eq!(turn.status, GameStatus::InProgress);
            assert_eq!(turn.attempts, n);
        }
        let turn = game.advance(miss()).unwrap();
        assert_eq!(turn.status, GameStatus::Lost);
        assert_eq!(game.history().len(), 20);
        assert_eq!(game.remaining_attempts(), 0);
    }

    #[test]
    fn test_win_on_last_attempt_beats_loss() {
        let mut game = Game::new(Rules::default(), secret());
        for _ in 1..20 {
            game.advance(miss()).unwrap();
        }
        let turn = game.advance(secret()).unwrap();
        assert_eq!(turn.status, GameStatus::Won);
    }

    #[test]
    fn test_finished_game_rejects_guess() {
        let mut game = Game::new(Rules::default(), secret());
        game.advance(secret()).unwrap();
        let before = game.clone();

        let err = game.advance(miss()).unwrap_err();
        assert_eq!(err, EngineError::GameAlreadyFinished(GameStatus::Won));
        assert_eq!(game, before);
    }

    #[test]
    fn test_invalid_guess_leaves_game_untouched() {
        let mut game = Game::new(Rules::default(), secret());
        let before = game.clone();

        let err = game
            .advance(Code::new(vec![Red, Blue, Green, Yellow, Purple]))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidGuess(_)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_attempt_numbers_are_sequential() {
        let mut game = Game::new(Rules::default(), secret());
        for _ in 0..3 {
            game.advance(miss()).unwrap();
        }
        let numbers: Vec<u32> = game.history().iter().map(Attempt::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_restore_sorts_history() {
        let history = vec![
            Attempt::new(miss(), ScoreTally::new(0, 0, 6), 2),
            Attempt::new(miss(), ScoreTally::new(0, 0, 6), 1),
        ];
        let game = Game::restore(
            Rules::default(),
            secret(),
            2,
            history,
            GameStatus::InProgress,
        );
        assert_eq!(game.history()[0].number(), 1);
        assert_eq!(game.last_attempt().map(Attempt::number), Some(2));
    }

    #[test]
    fn test_status_names() {
        assert_eq!(GameStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(GameStatus::from_str("LOST").unwrap(), GameStatus::Lost);
        assert_eq!(
            serde_json::to_string(&GameStatus::Won).unwrap(),
            r#""WON""#
        );
    }
}
