//! The post lifecycle: creation pipeline, derived fields, authorization
//! and edits, driven through the ports.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    NewPost, Page, PageRequest, Post, PostEdit, PostOrder, PostSubmission, Subphez, User,
    VoteFilter, validate_vote_value,
};
use crate::error::DomainError;
use crate::ports::{
    CommentStore, CommunityService, MarkdownRenderer, PostRepository, TextSanitizer, VoteLedger,
};

/// Every derived field of a post, computed at one point in time.
///
/// Totals and counts are read live from the ledger and comment store, so
/// two snapshots of the same post can disagree.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetails {
    pub post: Post,
    pub path: String,
    pub link: String,
    pub domain: String,
    pub encoded_url: String,
    pub rendered_body: String,
    pub vote_total: i64,
    pub upvote_total: i64,
    pub downvote_total: i64,
    pub comment_count: u64,
    pub editable: bool,
    pub owned: bool,
    pub moderatable: bool,
}

/// Post entity service.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    votes: Arc<dyn VoteLedger>,
    comments: Arc<dyn CommentStore>,
    communities: Arc<dyn CommunityService>,
    sanitizer: Arc<dyn TextSanitizer>,
    markdown: Arc<dyn MarkdownRenderer>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        votes: Arc<dyn VoteLedger>,
        comments: Arc<dyn CommentStore>,
        communities: Arc<dyn CommunityService>,
        sanitizer: Arc<dyn TextSanitizer>,
        markdown: Arc<dyn MarkdownRenderer>,
    ) -> Self {
        Self {
            posts,
            votes,
            comments,
            communities,
            sanitizer,
            markdown,
        }
    }

    /// Validate, normalize and persist a submission, then record the
    /// author's initial upvote.
    ///
    /// If the upvote cannot be recorded the inserted post is removed again
    /// and the ledger error is returned.
    #[tracing::instrument(
        skip_all,
        fields(
            author = %author.id,
            subphez = %submission.subphez_id,
            is_self = submission.is_self
        )
    )]
    pub async fn create(
        &self,
        author: &User,
        submission: PostSubmission,
    ) -> Result<Post, DomainError> {
        let subphez_id = submission.subphez_id;
        let new_post = NewPost::prepare(submission, author, self.sanitizer.as_ref())?;
        tracing::debug!(guid = %new_post.guid, "Submission validated and normalized");

        if self.communities.find_subphez(subphez_id).await?.is_none() {
            return Err(DomainError::subphez_not_found(subphez_id));
        }

        let post = self.posts.insert(new_post).await?;

        if let Err(err) = self.votes.upvote(author.id, post.id).await {
            tracing::warn!(
                post_id = %post.id,
                error = %err,
                "Initial upvote failed, removing post"
            );
            if let Err(cleanup) = self.posts.delete(post.id).await {
                tracing::error!(
                    post_id = %post.id,
                    error = %cleanup,
                    "Could not remove post left without its initial vote"
                );
            }
            return Err(err.into());
        }

        // Reload so `points` reflects the initial vote.
        let post = self.find(post.id).await?;
        tracing::info!(post_id = %post.id, guid = %post.guid, "Post created");
        Ok(post)
    }

    pub async fn find(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn subphez_of(&self, post: &Post) -> Result<Subphez, DomainError> {
        self.communities
            .find_subphez(post.subphez_id)
            .await?
            .ok_or_else(|| DomainError::subphez_not_found(post.subphez_id))
    }

    pub async fn post_path(&self, post: &Post) -> Result<String, DomainError> {
        let subphez = self.subphez_of(post).await?;
        Ok(post.post_path(&subphez.path))
    }

    pub async fn linkable_target(&self, post: &Post) -> Result<String, DomainError> {
        if !post.is_self {
            return Ok(post.url.clone().unwrap_or_default());
        }
        self.post_path(post).await
    }

    pub async fn vote_total(&self, post: &Post) -> Result<i64, DomainError> {
        Ok(self.votes.sum(post.id, VoteFilter::All).await?)
    }

    pub async fn upvote_total(&self, post: &Post) -> Result<i64, DomainError> {
        Ok(self.votes.sum(post.id, VoteFilter::Positive).await?)
    }

    /// Magnitude of the negative votes; never below zero.
    pub async fn downvote_total(&self, post: &Post) -> Result<i64, DomainError> {
        Ok(-self.votes.sum(post.id, VoteFilter::Negative).await?)
    }

    pub async fn comment_count(&self, post: &Post) -> Result<u64, DomainError> {
        Ok(self.comments.count_for(post.id).await?)
    }

    pub fn rendered_body(&self, post: &Post) -> String {
        post.rendered_body(self.markdown.as_ref())
    }

    pub async fn is_moderatable_by(&self, post: &Post, actor: &User) -> Result<bool, DomainError> {
        let subphez = self.subphez_of(post).await?;
        Ok(self.communities.can_moderate(&subphez, actor).await?)
    }

    /// Compute every derived field for display.
    pub async fn details(
        &self,
        post: Post,
        viewer: Option<&User>,
    ) -> Result<PostDetails, DomainError> {
        let subphez = self.subphez_of(&post).await?;
        let path = post.post_path(&subphez.path);
        let link = post.linkable_target(&subphez.path);

        let (owned, moderatable) = match viewer {
            Some(user) => (
                post.is_owned_by(user),
                self.communities.can_moderate(&subphez, user).await?,
            ),
            None => (false, false),
        };

        Ok(PostDetails {
            path,
            link,
            domain: post.domain(),
            encoded_url: post.encoded_url(),
            rendered_body: self.rendered_body(&post),
            vote_total: self.vote_total(&post).await?,
            upvote_total: self.upvote_total(&post).await?,
            downvote_total: self.downvote_total(&post).await?,
            comment_count: self.comment_count(&post).await?,
            editable: post.is_editable(),
            owned,
            moderatable,
            post,
        })
    }

    /// Edit a self post's title or body while it is still editable.
    #[tracing::instrument(skip(self, actor, edit), fields(actor = %actor.id))]
    pub async fn edit(
        &self,
        actor: &User,
        post_id: Uuid,
        edit: PostEdit,
    ) -> Result<Post, DomainError> {
        self.edit_at(actor, post_id, edit, Utc::now()).await
    }

    pub async fn edit_at(
        &self,
        actor: &User,
        post_id: Uuid,
        edit: PostEdit,
        now: DateTime<Utc>,
    ) -> Result<Post, DomainError> {
        let mut post = self.find(post_id).await?;
        self.authorize_change(&post, actor).await?;

        if !post.is_editable_at(now) {
            tracing::debug!(
                post_id = %post.id,
                created_at = %post.created_at,
                "Edit window closed"
            );
            return Err(DomainError::NotEditable);
        }

        edit.apply(&mut post, self.sanitizer.as_ref())?;
        let post = self.posts.save(post).await?;
        tracing::info!(post_id = %post.id, "Post edited");
        Ok(post)
    }

    /// Delete a post. Its votes go with it through the store's cascade.
    #[tracing::instrument(skip(self, actor), fields(actor = %actor.id))]
    pub async fn delete(&self, actor: &User, post_id: Uuid) -> Result<(), DomainError> {
        let post = self.find(post_id).await?;
        self.authorize_change(&post, actor).await?;

        self.posts.delete(post.id).await?;
        tracing::info!(post_id = %post.id, "Post deleted");
        Ok(())
    }

    /// Record the actor's up or down vote and return the refreshed post.
    #[tracing::instrument(skip(self, actor), fields(actor = %actor.id))]
    pub async fn vote(&self, actor: &User, post_id: Uuid, value: i32) -> Result<Post, DomainError> {
        let value = validate_vote_value(value)?;
        let post = self.find(post_id).await?;

        self.votes.cast(actor.id, post.id, value).await?;
        self.find(post.id).await
    }

    pub async fn list(
        &self,
        order: PostOrder,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        Ok(self.posts.list(order, page).await?)
    }

    /// Posts from every subphez the user subscribes to, newest first.
    pub async fn list_for_subscriber(
        &self,
        user: &User,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        let subphez_ids = self.communities.subscribed_subphez_ids(user.id).await?;
        if subphez_ids.is_empty() {
            return Ok(Page::empty(page));
        }

        Ok(self
            .posts
            .list_in_subphezes(&subphez_ids, PostOrder::default(), page)
            .await?)
    }

    async fn authorize_change(&self, post: &Post, actor: &User) -> Result<(), DomainError> {
        if post.is_owned_by(actor) || self.is_moderatable_by(post, actor).await? {
            Ok(())
        } else {
            Err(DomainError::Forbidden)
        }
    }
}
