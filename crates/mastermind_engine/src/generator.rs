//! Secret code generation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, instrument};

use crate::{Code, Color, EngineError, Rules};

/// Draws secret codes of distinct colors from the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeGenerator {
    rules: Rules,
}

impl CodeGenerator {
    /// Creates a generator for the given rules.
    pub fn new(rules: Rules) -> Self {
        Self { rules }
    }

    /// Rules this generator draws codes for.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Generates a secret code.
    ///
    /// Colors are sampled without replacement, so the code never repeats a
    /// color. With a seed the result is reproducible; without one the
    /// generator is seeded from the operating system.
    #[instrument(skip(self), fields(code_length = self.rules.code_length()))]
    pub fn generate(&self, seed: Option<u64>) -> Code {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut palette = Color::palette(self.rules.palette_size());
        palette.shuffle(&mut rng);
        palette.truncate(self.rules.code_length());

        debug!(seeded = seed.is_some(), "Secret code generated");
        Code::new(palette)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

/// Generates a secret code of `code_length` distinct colors drawn from the
/// first `palette_size` palette colors.
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfiguration`] if the sizes are
/// inconsistent, e.g. `code_length > palette_size`.
#[instrument]
pub fn generate(
    palette_size: usize,
    code_length: usize,
    seed: Option<u64>,
) -> Result<Code, EngineError> {
    let rules = Rules::new(palette_size, code_length, crate::MAX_ATTEMPTS)?;
    Ok(CodeGenerator::new(rules).generate(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let generator = CodeGenerator::default();
        assert_eq!(generator.generate(Some(42)), generator.generate(Some(42)));
    }

    #[test]
    fn test_generated_code_is_distinct_palette_colors() {
        let generator = CodeGenerator::default();
        for seed in 0..200 {
            let code = generator.generate(Some(seed));
            assert_eq!(code.len(), 6);
            assert!(code.is_distinct(), "seed {seed} produced {code}");
        }
    }

    #[test]
    fn test_unseeded_generation_is_valid() {
        let code = CodeGenerator::default().generate(None);
        assert_eq!(code.len(), 6);
        assert!(code.is_distinct());
    }

    #[test]
    fn test_small_palette_only_uses_prefix() {
        let code = generate(4, 4, Some(7)).unwrap();
        let mut colors = code.colors().to_vec();
        colors.sort();
        assert_eq!(colors, Color::palette(4));
    }

    #[test]
    fn test_code_longer_than_palette_is_rejected() {
        let err = generate(5, 6, None).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }
}
