//! # Phez Core
//!
//! The domain layer of the Phez forum.
//! Posts, their formatting and sanitization rules, the ports the post
//! lifecycle depends on, and the [`PostService`] that drives it.
//! Nothing in here talks to a database or the network directly.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError, ValidationError};
pub use service::PostService;
