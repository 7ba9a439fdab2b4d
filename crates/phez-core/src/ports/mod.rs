//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod text;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use repository::{BaseRepository, CommentStore, CommunityService, PostRepository, VoteLedger};
pub use text::{MarkdownOptions, MarkdownRenderer, TextSanitizer};
