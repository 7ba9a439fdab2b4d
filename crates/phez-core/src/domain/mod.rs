//! Domain entities - the core business objects.

mod comment;
pub mod format;
mod page;
mod post;
mod subphez;
pub mod text;
mod user;
mod vote;

pub use comment::Comment;
pub use page::{MAX_PAGE, PER_PAGE, Page, PageRequest};
pub use post::{EDIT_WINDOW_HOURS, NewPost, Post, PostEdit, PostOrder, PostSubmission};
pub use subphez::Subphez;
pub use user::User;
pub use vote::{DOWNVOTE, UPVOTE, Vote, VoteFilter, validate_vote_value};
