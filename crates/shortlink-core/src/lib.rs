//! Core types and traits for the shortlink service.
//!
//! This crate provides the domain types shared by the storage backends,
//! the link use case and the HTTP gateway.

pub mod error;
pub mod link;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{CoreError, ShortenerError, StorageError};
pub use link::Link;
pub use repository::Repository;
pub use shortcode::ShortCode;
pub use shortener::Shortener;
