//! The fixed color palette.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use tracing::instrument;

use crate::EngineError;

/// A peg color.
///
/// The palette is closed: exactly ten colors, in the order below. Parsing
/// from a name is case-insensitive.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Color {
    /// Red.
    Red,
    /// Blue.
    Blue,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Purple.
    Purple,
    /// Orange.
    Orange,
    /// Pink.
    Pink,
    /// Brown.
    Brown,
    /// Silver.
    Silver,
    /// Black.
    Black,
}

/// Number of colors in the full palette.
pub const PALETTE_SIZE: usize = Color::COUNT;

impl Color {
    /// Parses a color name, ignoring ASCII case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownColor`] if the name is not in the palette.
    #[instrument]
    pub fn parse(name: &str) -> Result<Self, EngineError> {
        name.trim()
            .parse()
            .map_err(|_| EngineError::UnknownColor(name.to_string()))
    }

    /// Returns the canonical color name.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Position of this color in the palette (0-9).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the first `size` colors of the palette.
    pub fn palette(size: usize) -> Vec<Color> {
        Color::iter().take(size).collect()
    }

    /// Returns the full palette in order.
    pub fn all() -> Vec<Color> {
        Color::iter().collect()
    }
}
