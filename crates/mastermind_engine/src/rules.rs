//! Game configuration.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{EngineError, PALETTE_SIZE};

/// Number of pegs in a code under the standard rules.
pub const CODE_LENGTH: usize = 6;

/// Guesses allowed before the game is lost under the standard rules.
pub const MAX_ATTEMPTS: u32 = 20;

/// Parameters of a Mastermind game.
///
/// Construct with [`Rules::new`] to get validation, or use
/// [`Rules::default`] for the standard 10-color, 6-peg, 20-attempt game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rules {
    palette_size: usize,
    code_length: usize,
    max_attempts: u32,
}

impl Rules {
    /// Creates validated rules.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] when the palette is
    /// larger than the fixed color set, the code is empty or longer than
    /// the palette, or no attempts are allowed.
    #[instrument]
    pub fn new(
        palette_size: usize,
        code_length: usize,
        max_attempts: u32,
    ) -> Result<Self, EngineError> {
        if palette_size > PALETTE_SIZE {
            return Err(EngineError::InvalidConfiguration(format!(
                "palette size {palette_size} exceeds the {PALETTE_SIZE} available colors"
            )));
        }
        if code_length == 0 {
            return Err(EngineError::InvalidConfiguration(
                "code length must be at least 1".to_string(),
            ));
        }
        if code_length > palette_size {
            return Err(EngineError::InvalidConfiguration(format!(
                "code length {code_length} exceeds palette size {palette_size}"
            )));
        }
        if max_attempts == 0 {
            return Err(EngineError::InvalidConfiguration(
                "at least one attempt must be allowed".to_string(),
            ));
        }
        Ok(Self {
            palette_size,
            code_length,
            max_attempts,
        })
    }

    /// Number of palette colors in play.
    pub const fn palette_size(&self) -> usize {
        self.palette_size
    }

    /// Number of pegs in a code.
    pub const fn code_length(&self) -> usize {
        self.code_length
    }

    /// Guesses allowed before the game is lost.
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            palette_size: PALETTE_SIZE,
            code_length: CODE_LENGTH,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}
