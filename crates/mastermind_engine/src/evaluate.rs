//! Guess scoring.
//!
//! Scoring is a single left-to-right pass over the guess. A slot is
//! [`MatchKind::Exact`] when it matches the secret at the same index. A color
//! already used earlier in the guess scores [`MatchKind::None`] on every
//! later non-exact slot. Otherwise the first secret slot holding that color
//! is located, and the slot scores [`MatchKind::Position`] only if that
//! secret slot is not itself an exact match.
//!
//! This is order-dependent and differs from the two-pass peg count found in
//! most Mastermind implementations. Observable scores depend on it.

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::{Code, PALETTE_SIZE};

/// Classification of a single guess slot.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchKind {
    /// Right color, right position.
    Exact,
    /// Color occurs elsewhere in the secret.
    Position,
    /// Neither of the above.
    None,
}

/// Count of guess slots per [`MatchKind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTally {
    exact: usize,
    position: usize,
    none: usize,
}

impl ScoreTally {
    /// Builds a tally from explicit counts.
    pub fn new(exact: usize, position: usize, none: usize) -> Self {
        Self {
            exact,
            position,
            none,
        }
    }

    /// Count for one kind.
    pub fn get(&self, kind: MatchKind) -> usize {
        match kind {
            MatchKind::Exact => self.exact,
            MatchKind::Position => self.position,
            MatchKind::None => self.none,
        }
    }

    /// Slots of the right color in the right place.
    pub fn exact(&self) -> usize {
        self.exact
    }

    /// Slots of a color found elsewhere in the secret.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Slots that matched nothing.
    pub fn none(&self) -> usize {
        self.none
    }

    /// Sum of all counts; always the code length for a scored guess.
    pub fn total(&self) -> usize {
        self.exact + self.position + self.none
    }

    fn record(&mut self, kind: MatchKind) {
        match kind {
            MatchKind::Exact => self.exact += 1,
            MatchKind::Position => self.position += 1,
            MatchKind::None => self.none += 1,
        }
    }
}

impl FromIterator<MatchKind> for ScoreTally {
    fn from_iter<I: IntoIterator<Item = MatchKind>>(iter: I) -> Self {
        let mut tally = Self::default();
        for kind in iter {
            tally.record(kind);
        }
        tally
    }
}

impl std::fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} exact, {} position, {} none",
            self.exact, self.position, self.none
        )
    }
}

/// Classifies every slot of `guess` against `secret`.
///
/// Both codes must have the same length; validate guesses with
/// [`is_valid_guess`](crate::is_valid_guess) first. Slots beyond the shorter
/// code are not classified.
#[instrument(skip_all, fields(secret_len = secret.len(), guess_len = guess.len()))]
pub fn classify(secret: &Code, guess: &Code) -> Vec<MatchKind> {
    let secret_colors = secret.colors();
    let guess_colors = guess.colors();
    let mut seen = [false; PALETTE_SIZE];

    secret_colors
        .iter()
        .zip(guess_colors)
        .map(|(&expected, &color)| {
            let kind = if color == expected {
                MatchKind::Exact
            } else if seen[color.index()] {
                MatchKind::None
            } else {
                match secret.position_of(color) {
                    Some(j) if guess_colors.get(j) != Some(&secret_colors[j]) => {
                        MatchKind::Position
                    }
                    _ => MatchKind::None,
                }
            };
            seen[color.index()] = true;
            trace!(color = %color, kind = %kind, "Slot classified");
            kind
        })
        .collect()
}

/// Scores `guess` against `secret`.
#[instrument(skip_all)]
pub fn evaluate(secret: &Code, guess: &Code) -> ScoreTally {
    classify(secret, guess).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color::*;

    fn secret() -> Code {
        Code::new(vec![Red, Blue, Green, Yellow, Purple, Orange])
    }

    #[test]
    fn test_exact_guess() {
        let tally = evaluate(&secret(), &secret());
        assert_eq!(tally, ScoreTally::new(6, 0, 0));
    }

    #[test]
    fn test_disjoint_guess() {
        let guess = Code::new(vec![Pink, Brown, Silver, Black, Pink, Brown]);
        assert_eq!(evaluate(&secret(), &guess), ScoreTally::new(0, 0, 6));
    }

    #[test]
    fn test_mixed_guess() {
        let guess = Code::new(vec![Blue, Red, Green, Black, Purple, Pink]);
        assert_eq!(
            classify(&secret(), &guess),
            vec![
                MatchKind::Position,
                MatchKind::Position,
                MatchKind::Exact,
                MatchKind::None,
                MatchKind::Exact,
                MatchKind::None,
            ]
        );
        assert_eq!(evaluate(&secret(), &guess), ScoreTally::new(2, 2, 2));
    }

    #[test]
    fn test_repeated_guess_color_scores_none() {
        let guess = Code::new(vec![Red, Red, Green, Yellow, Purple, Orange]);
        let kinds = classify(&secret(), &guess);
        assert_eq!(kinds[0], MatchKind::Exact);
        assert_eq!(kinds[1], MatchKind::None);
        assert_eq!(evaluate(&secret(), &guess), ScoreTally::new(5, 0, 1));
    }

    #[test]
    fn test_color_whose_secret_slot_is_exact_scores_none() {
        // Blue sits at secret[1] and the guess also has Blue there, so the
        // earlier Blue cannot claim it.
        let guess = Code::new(vec![Blue, Blue, Pink, Pink, Pink, Pink]);
        assert_eq!(
            classify(&secret(), &guess),
            vec![
                MatchKind::None,
                MatchKind::Exact,
                MatchKind::None,
                MatchKind::None,
                MatchKind::None,
                MatchKind::None,
            ]
        );
    }

    #[test]
    fn test_rotated_guess_is_all_position() {
        let guess = Code::new(vec![Orange, Red, Blue, Green, Yellow, Purple]);
        assert_eq!(evaluate(&secret(), &guess), ScoreTally::new(0, 6, 0));
    }

    #[test]
    fn test_tally_lookup_by_kind() {
        let tally = ScoreTally::new(1, 2, 3);
        assert_eq!(tally.get(MatchKind::Exact), 1);
        assert_eq!(tally.get(MatchKind::Position), 2);
        assert_eq!(tally.get(MatchKind::None), 3);
        assert_eq!(tally.total(), 6);
    }
}
