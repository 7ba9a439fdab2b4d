//! # Phez Infrastructure
//!
//! Concrete implementations of the ports defined in `phez-core`.
//! This crate contains the stores, text adapters and token handling.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory store only
//! - `postgres` - PostgreSQL store via SeaORM
//! - `auth` - JWT bearer tokens

pub mod database;
pub mod memory;
pub mod text;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use memory::InMemoryStore;
pub use text::{ComrakRenderer, HtmlStripper};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConnections, PostgresCommentStore, PostgresCommunityService, PostgresPostRepository,
    PostgresVoteLedger,
};
