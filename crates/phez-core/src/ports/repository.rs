use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    NewPost, Page, PageRequest, Post, PostOrder, Subphez, UPVOTE, User, Vote, VoteFilter,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an existing entity.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Dependent rows are the store's concern.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Insert a new post. The store assigns `id` and `created_at`;
    /// `points` and `hot_score` start at zero.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    async fn list(&self, order: PostOrder, page: PageRequest) -> Result<Page<Post>, RepoError>;

    /// Posts belonging to any of the given subphezes.
    async fn list_in_subphezes(
        &self,
        subphez_ids: &[Uuid],
        order: PostOrder,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError>;
}

/// Vote ledger. One vote per user and post; casting again replaces it.
#[async_trait]
pub trait VoteLedger: Send + Sync {
    /// Record `value` as `user_id`'s vote on `post_id` and refresh the
    /// post's cached `points`.
    async fn cast(&self, user_id: Uuid, post_id: Uuid, value: i32) -> Result<Vote, RepoError>;

    async fn upvote(&self, user_id: Uuid, post_id: Uuid) -> Result<Vote, RepoError> {
        self.cast(user_id, post_id, UPVOTE).await
    }

    /// Sum of `vote_value` over the post's votes that pass `filter`.
    async fn sum(&self, post_id: Uuid, filter: VoteFilter) -> Result<i64, RepoError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Number of comments whose commentable target is `post_id`.
    async fn count_for(&self, post_id: Uuid) -> Result<u64, RepoError>;
}

/// Community lookups and moderation rules.
#[async_trait]
pub trait CommunityService: Send + Sync {
    async fn find_subphez(&self, id: Uuid) -> Result<Option<Subphez>, RepoError>;

    async fn can_moderate(&self, subphez: &Subphez, user: &User) -> Result<bool, RepoError>;

    async fn subscribed_subphez_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError>;
}
