use crate::{Generator, BASE62_ALPHABET};
use shortlink_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

const WIDTH: usize = 6;

/// A sequential short code generator.
///
/// Produces codes like "wh000000", "wh000001", ..., "wh00000z", "wh000010",
/// with the counter rendered in base62 and left-padded to six characters.
/// Codes never repeat within a single instance, which makes this generator
/// handy for tests and single-node setups.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    ///
    /// The prefix should only contain `[a-zA-Z0-9_-]` and be short enough
    /// that `prefix + 6` stays within the short code length limit.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

fn encode_base62(mut value: u64) -> String {
    let mut digits = Vec::with_capacity(WIDTH);
    loop {
        digits.push(BASE62_ALPHABET[(value % 62) as usize]);
        value /= 62;
        if value == 0 {
            break;
        }
    }
    while digits.len() < WIDTH {
        digits.push(b'0');
    }
    digits.iter().rev().map(|&b| char::from(b)).collect()
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(format!("{}{}", self.prefix, encode_base62(count)))
    }
}
