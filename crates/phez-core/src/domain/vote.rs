use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub const UPVOTE: i32 = 1;
pub const DOWNVOTE: i32 = -1;

/// One user's vote on one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub vote_value: i32,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(post_id: Uuid, user_id: Uuid, vote_value: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            vote_value,
            created_at: Utc::now(),
        }
    }
}

/// Which votes an aggregate sums over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteFilter {
    All,
    Positive,
    Negative,
}

impl VoteFilter {
    pub fn matches(self, vote_value: i32) -> bool {
        match self {
            VoteFilter::All => true,
            VoteFilter::Positive => vote_value > 0,
            VoteFilter::Negative => vote_value < 0,
        }
    }
}

/// Only single up or down votes are accepted from users.
pub fn validate_vote_value(value: i32) -> Result<i32, ValidationError> {
    match value {
        UPVOTE | DOWNVOTE => Ok(value),
        other => Err(ValidationError::InvalidVoteValue(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_sign() {
        assert!(VoteFilter::All.matches(-3));
        assert!(VoteFilter::Positive.matches(1));
        assert!(!VoteFilter::Positive.matches(0));
        assert!(VoteFilter::Negative.matches(-1));
        assert!(!VoteFilter::Negative.matches(2));
    }

    #[test]
    fn test_validate_vote_value() {
        assert_eq!(validate_vote_value(1), Ok(1));
        assert_eq!(validate_vote_value(-1), Ok(-1));
        assert_eq!(
            validate_vote_value(5),
            Err(ValidationError::InvalidVoteValue(5))
        );
    }
}
