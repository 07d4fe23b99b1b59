//! Guess validation.

use tracing::instrument;

use crate::{Code, EngineError, Rules};

/// True when `guess` has exactly the code length and only uses colors from
/// the palette in play.
///
/// Repeated colors are allowed in a guess even though secret codes never
/// repeat a color.
#[instrument(skip_all, fields(len = guess.len()))]
pub fn is_valid_guess(guess: &Code, rules: &Rules) -> bool {
    check_guess(guess, rules).is_ok()
}

/// Like [`is_valid_guess`], reporting why a guess is rejected.
///
/// # Errors
///
/// Returns [`EngineError::InvalidGuess`] describing the first problem found.
#[instrument(skip_all, fields(len = guess.len()))]
pub fn check_guess(guess: &Code, rules: &Rules) -> Result<(), EngineError> {
    if guess.len() != rules.code_length() {
        return Err(EngineError::InvalidGuess(format!(
            "expected {} colors, got {}",
            rules.code_length(),
            guess.len()
        )));
    }
    if let Some(color) = guess
        .colors()
        .iter()
        .find(|c| c.index() >= rules.palette_size())
    {
        return Err(EngineError::InvalidGuess(format!(
            "{color} is not in the {}-color palette",
            rules.palette_size()
        )));
    }
    Ok(())
}
