//! Link use case for the shortlink service.
//!
//! [`LinkService`] validates input, asks a [`Generator`] for candidate codes
//! and persists them through a [`Repository`], retrying a bounded number of
//! times when a candidate is already taken.
//!
//! [`Generator`]: shortlink_generator::Generator
//! [`Repository`]: shortlink_core::Repository

pub mod service;
mod validate;

pub use service::{LinkService, DEFAULT_MAX_ATTEMPTS};
pub use shortlink_core::{Shortener, ShortenerError};
