use crate::error::ShortenerError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Stores `target` under a freshly generated short code and returns the code.
    async fn create_link(&self, target: &str) -> Result<ShortCode>;

    /// Resolves a short code to the target URL it was created for.
    async fn get_link(&self, code: &str) -> Result<String>;
}
