use async_trait::async_trait;
use parking_lot::RwLock;
use shortlink_core::repository::{Repository, Result};
use shortlink_core::{Link, ShortCode, StorageError};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// In-memory implementation of the [`Repository`] trait.
///
/// All links live in one `HashMap` behind a single `RwLock`. Inserts take the
/// write guard for the whole check-and-insert, so two concurrent `create`
/// calls for the same code can never both succeed. Reads share the read guard.
///
/// Cloning the repository shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    links: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: Arc::new(RwLock::new(HashMap::with_capacity(capacity))),
        }
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.read().is_empty()
    }

    /// Copies out every stored link, in no particular order.
    pub fn snapshot(&self) -> Vec<Link> {
        self.links
            .read()
            .iter()
            .map(|(code, target)| {
                Link::new(ShortCode::new_unchecked(code.as_str()), target.as_str())
            })
            .collect()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn create(&self, code: &ShortCode, target: &str) -> Result<()> {
        let mut links = self.links.write();

        match links.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::AlreadyExists(code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(target.to_owned());
                trace!(code = %code, "stored link in memory");
                Ok(())
            }
        }
    }

    async fn fetch(&self, code: &ShortCode) -> Result<String> {
        self.links
            .read()
            .get(code.as_str())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(code.to_string()))
    }
}
