use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Durable owner of every code → target mapping.
///
/// Implementations must be interchangeable: the same sequence of calls has
/// to produce the same outcomes regardless of the backend, apart from
/// [`StorageError::Unavailable`].
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Inserts a new mapping.
    ///
    /// Returns `Err(AlreadyExists)` if the code is taken; the stored target
    /// is left untouched in that case.
    async fn create(&self, code: &ShortCode, target: &str) -> Result<()>;

    /// Looks up the target for a code. Returns `Err(NotFound)` if the code
    /// was never stored.
    async fn fetch(&self, code: &ShortCode) -> Result<String>;
}
