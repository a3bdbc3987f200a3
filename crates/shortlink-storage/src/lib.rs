//! Storage backends for the shortlink service.
//!
//! Two interchangeable implementations of [`Repository`] live here:
//! [`InMemoryRepository`] for single-process deployments and tests, and
//! [`PostgresRepository`] backed by a sqlx connection pool.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::{PostgresRepository, PostgresSettings};
pub use shortlink_core::repository::{Repository, Result};
pub use shortlink_core::StorageError;
