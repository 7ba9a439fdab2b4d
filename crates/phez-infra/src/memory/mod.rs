//! In-memory store - used when no database is configured, and in tests.
//!
//! One [`InMemoryStore`] backs every storage port so that the relational
//! rules hold across them: deleting a post drops its votes, and casting a
//! vote refreshes the post's points.
//! Note: Data is lost on process restart.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use phez_core::domain::{
    Comment, NewPost, Page, PageRequest, PER_PAGE, Post, PostOrder, Subphez, User, Vote,
    VoteFilter,
};
use phez_core::error::RepoError;
use phez_core::ports::{
    BaseRepository, CommentStore, CommunityService, PostRepository, VoteLedger,
};

#[derive(Default)]
struct State {
    /// Kept in insertion order so equal sort keys list oldest first.
    posts: Vec<Post>,
    votes: Vec<Vote>,
    comments: Vec<Comment>,
    subphezes: HashMap<Uuid, Subphez>,
    /// subphez id -> moderator user ids
    moderators: HashMap<Uuid, HashSet<Uuid>>,
    /// user id -> subscribed subphez ids
    subscriptions: HashMap<Uuid, HashSet<Uuid>>,
}

impl State {
    fn post_mut(&mut self, id: Uuid) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    fn vote_sum(&self, post_id: Uuid, filter: VoteFilter) -> i64 {
        self.votes
            .iter()
            .filter(|v| v.post_id == post_id && filter.matches(v.vote_value))
            .map(|v| i64::from(v.vote_value))
            .sum()
    }
}

/// In-memory implementation of every storage port, using an async RwLock.
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    pub async fn add_subphez(&self, subphez: Subphez) -> Subphez {
        let mut state = self.state.write().await;
        state.subphezes.insert(subphez.id, subphez.clone());
        subphez
    }

    pub async fn add_moderator(&self, subphez_id: Uuid, user_id: Uuid) {
        let mut state = self.state.write().await;
        state.moderators.entry(subphez_id).or_default().insert(user_id);
    }

    pub async fn subscribe(&self, user_id: Uuid, subphez_id: Uuid) {
        let mut state = self.state.write().await;
        state.subscriptions.entry(user_id).or_default().insert(subphez_id);
    }

    pub async fn add_comment(&self, comment: Comment) -> Comment {
        let mut state = self.state.write().await;
        state.comments.push(comment.clone());
        comment
    }

    pub async fn vote_count(&self, post_id: Uuid) -> usize {
        let state = self.state.read().await;
        state.votes.iter().filter(|v| v.post_id == post_id).count()
    }

    fn paginate<'a>(
        posts: impl Iterator<Item = &'a Post>,
        order: PostOrder,
        page: PageRequest,
    ) -> Page<Post> {
        let mut sorted: Vec<&Post> = posts.collect();
        match order {
            PostOrder::Latest => sorted.sort_by_key(|p| Reverse(p.created_at)),
            PostOrder::Points => sorted.sort_by_key(|p| Reverse(p.points)),
            PostOrder::Hot => sorted.sort_by(|a, b| b.hot_score.total_cmp(&a.hot_score)),
        }

        let total = sorted.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = sorted
            .into_iter()
            .skip(offset)
            .take(PER_PAGE as usize)
            .cloned()
            .collect();

        Page::new(items, page, total)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let state = self.state.read().await;
        Ok(state.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        let stored = state.post_mut(post.id).ok_or(RepoError::NotFound)?;
        *stored = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        if state.posts.len() == before {
            return Err(RepoError::NotFound);
        }

        // ON DELETE CASCADE
        state.votes.retain(|v| v.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        if !state.subphezes.contains_key(&post.subphez_id) {
            return Err(RepoError::Constraint(format!(
                "subphez {} does not exist",
                post.subphez_id
            )));
        }

        let post = Post {
            id: Uuid::new_v4(),
            title: post.title,
            body: post.body,
            url: post.url,
            is_self: post.is_self,
            guid: post.guid,
            user_id: post.user_id,
            subphez_id: post.subphez_id,
            points: 0,
            hot_score: 0.0,
            created_at: Utc::now(),
        };
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn list(&self, order: PostOrder, page: PageRequest) -> Result<Page<Post>, RepoError> {
        let state = self.state.read().await;
        Ok(Self::paginate(state.posts.iter(), order, page))
    }

    async fn list_in_subphezes(
        &self,
        subphez_ids: &[Uuid],
        order: PostOrder,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let state = self.state.read().await;
        let posts = state
            .posts
            .iter()
            .filter(|p| subphez_ids.contains(&p.subphez_id));
        Ok(Self::paginate(posts, order, page))
    }
}

#[async_trait]
impl VoteLedger for InMemoryStore {
    async fn cast(&self, user_id: Uuid, post_id: Uuid, value: i32) -> Result<Vote, RepoError> {
        let mut state = self.state.write().await;
        if state.post_mut(post_id).is_none() {
            return Err(RepoError::Constraint(format!("post {post_id} does not exist")));
        }

        state
            .votes
            .retain(|v| !(v.post_id == post_id && v.user_id == user_id));
        let vote = Vote::new(post_id, user_id, value);
        state.votes.push(vote.clone());

        let points = state.vote_sum(post_id, VoteFilter::All);
        if let Some(post) = state.post_mut(post_id) {
            post.points = points as i32;
        }

        Ok(vote)
    }

    async fn sum(&self, post_id: Uuid, filter: VoteFilter) -> Result<i64, RepoError> {
        let state = self.state.read().await;
        Ok(state.vote_sum(post_id, filter))
    }
}

#[async_trait]
impl CommentStore for InMemoryStore {
    async fn count_for(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .comments
            .iter()
            .filter(|c| c.commentable_id == post_id)
            .count() as u64)
    }
}

#[async_trait]
impl CommunityService for InMemoryStore {
    async fn find_subphez(&self, id: Uuid) -> Result<Option<Subphez>, RepoError> {
        let state = self.state.read().await;
        Ok(state.subphezes.get(&id).cloned())
    }

    async fn can_moderate(&self, subphez: &Subphez, user: &User) -> Result<bool, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .moderators
            .get(&subphez.id)
            .is_some_and(|mods| mods.contains(&user.id)))
    }

    async fn subscribed_subphez_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .subscriptions
            .get(&user_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }
}
