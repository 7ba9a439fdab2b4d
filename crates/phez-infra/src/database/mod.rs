//! Database connection management and the SeaORM store.

mod connections;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

pub use connections::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;

#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresCommentStore, PostgresCommunityService, PostgresPostRepository, PostgresVoteLedger,
};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
