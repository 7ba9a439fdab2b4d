//! SeaORM entities for the forum tables.

pub mod comment;
pub mod post;
pub mod subphez;
pub mod subphez_moderator;
pub mod subscription;
pub mod user;
pub mod vote;
