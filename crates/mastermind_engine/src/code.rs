//! Ordered color sequences: secret codes and guesses.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Color, EngineError};

/// Delimiter used by the storage representation of a code.
pub const STORAGE_DELIMITER: char = ',';

/// An ordered sequence of colors.
///
/// Both secret codes and guesses are codes. A `Code` does not enforce a
/// length on its own; guesses are checked against the [`Rules`](crate::Rules)
/// by [`is_valid_guess`](crate::is_valid_guess) before they are scored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(Vec<Color>);

impl Code {
    /// Wraps a color sequence.
    pub fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    /// Parses color names into a code.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownColor`] for the first name outside the
    /// palette.
    #[instrument(skip(names), fields(count = names.len()))]
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, EngineError> {
        names
            .iter()
            .map(|name| Color::parse(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Decodes the comma-joined storage form produced by [`Code::to_storage`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownColor`] if a stored name is not a color.
    #[instrument]
    pub fn from_storage(stored: &str) -> Result<Self, EngineError> {
        if stored.is_empty() {
            return Ok(Self(Vec::new()));
        }
        let names: Vec<&str> = stored.split(STORAGE_DELIMITER).collect();
        Self::parse(&names)
    }

    /// Encodes the code as comma-joined color names.
    pub fn to_storage(&self) -> String {
        self.names().join(&STORAGE_DELIMITER.to_string())
    }

    /// Canonical color names in order.
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|c| c.name().to_string()).collect()
    }

    /// Colors in order.
    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    /// Number of pegs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the code has no pegs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Color at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Color> {
        self.0.get(index).copied()
    }

    /// Index of the first peg with the given color.
    pub fn position_of(&self, color: Color) -> Option<usize> {
        self.0.iter().position(|&c| c == color)
    }

    /// True when no color appears twice.
    pub fn is_distinct(&self) -> bool {
        let mut seen = [false; crate::PALETTE_SIZE];
        self.0.iter().all(|c| !std::mem::replace(&mut seen[c.index()], true))
    }
}

impl From<Vec<Color>> for Code {
    fn from(colors: Vec<Color>) -> Self {
        Self(colors)
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.names().join(", "))
    }
}
