use crate::{Generator, BASE62_ALPHABET};
use rand::Rng;
use shortlink_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use shortlink_core::{CoreError, ShortCode};

pub const DEFAULT_CODE_LENGTH: usize = 10;

/// Draws fixed-length codes uniformly from the base62 alphabet.
///
/// Each call pulls from the thread-local CSPRNG, so the generator itself
/// carries no mutable state and can be shared freely between tasks.
#[derive(Debug, Clone, Copy)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of `length` characters.
    pub fn new(length: usize) -> Result<Self, CoreError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(CoreError::InvalidShortCode(format!(
                "generated code length must be between {} and {}, got {}",
                MIN_LENGTH, MAX_LENGTH, length
            )));
        }
        Ok(Self { length })
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| char::from(BASE62_ALPHABET[rng.random_range(0..BASE62_ALPHABET.len())]))
            .collect();
        ShortCode::new_unchecked(code)
    }
}
