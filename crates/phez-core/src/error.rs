//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Actor may not modify this post")]
    Forbidden,

    #[error("Post can no longer be edited")]
    NotEditable,

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl DomainError {
    pub fn post_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "post",
            id,
        }
    }

    pub fn subphez_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "subphez",
            id,
        }
    }
}

/// Structural problems with a submission. Nothing is persisted when one of
/// these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title cannot be blank")]
    BlankTitle,

    #[error("self posts need a body")]
    MissingBody,

    #[error("link posts need a url")]
    MissingUrl,

    #[error("self posts cannot carry a url")]
    UrlOnSelfPost,

    #[error("link posts cannot carry a body")]
    BodyOnLinkPost,

    #[error("vote value must be 1 or -1, got {0}")]
    InvalidVoteValue(i32),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
