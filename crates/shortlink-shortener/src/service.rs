use crate::validate::validate_target;
use async_trait::async_trait;
use shortlink_core::{Repository, ShortCode, Shortener, ShortenerError, StorageError};
use shortlink_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// How many candidate codes `create_link` tries before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `Generator` to handle:
/// - URL validation
/// - Short code generation
/// - Collision retry, bounded by `max_attempts`
///
/// It keeps no state of its own besides the two handles, so clones are cheap
/// and can be shared between any number of request tasks.
#[derive(Debug)]
pub struct LinkService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    max_attempts: usize,
}

impl<R, G> Clone for LinkService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            max_attempts: self.max_attempts,
        }
    }
}

impl<R: Repository, G: Generator> LinkService<R, G> {
    /// Creates a new `LinkService` with the default retry ceiling.
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the retry ceiling. Values below one are treated as one.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for LinkService<R, G> {
    async fn create_link(&self, target: &str) -> Result<ShortCode, ShortenerError> {
        validate_target(target)?;

        for attempt in 1..=self.max_attempts {
            let code: ShortCode = self.generator.generate().into();

            match self.repository.create(&code, target).await {
                Ok(()) => {
                    debug!(code = %code, attempt, "created link");
                    return Ok(code);
                }
                Err(StorageError::AlreadyExists(_)) => {
                    debug!(code = %code, attempt, "short code collision, retrying");
                }
                Err(err) => {
                    warn!(error = %err, "failed to store link");
                    return Err(storage_to_shortener_error(err));
                }
            }
        }

        warn!(
            attempts = self.max_attempts,
            "exhausted short code generation attempts"
        );
        Err(ShortenerError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }

    async fn get_link(&self, code: &str) -> Result<String, ShortenerError> {
        let code = ShortCode::new(code)?;
        trace!(code = %code, "resolving short code");

        let target = self
            .repository
            .fetch(&code)
            .await
            .map_err(storage_to_shortener_error)?;

        debug!(code = %code, target = %target, "resolved short code");
        Ok(target)
    }
}

/// Converts a StorageError to a ShortenerError.
fn storage_to_shortener_error(e: StorageError) -> ShortenerError {
    match e {
        StorageError::NotFound(code) => ShortenerError::NotFound(code),
        StorageError::Unavailable(message) => ShortenerError::Unavailable(message),
        // Only reachable if a backend reports a conflict outside `create`.
        StorageError::AlreadyExists(code) => {
            ShortenerError::Unavailable(format!("unexpected conflict on {code}"))
        }
    }
}
