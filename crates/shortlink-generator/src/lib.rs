pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use shortlink_core::ShortCode;

/// Alphabet used by the bundled generators: digits, upper and lower case letters.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// A generated code may already be taken; detecting that is the caller's job.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Produces a candidate short code.
    fn generate(&self) -> Self::Output;
}
