//! PostgreSQL implementations of the storage ports.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use phez_core::domain::{
    NewPost, Page, PageRequest, PER_PAGE, Post, PostOrder, Subphez, User, Vote, VoteFilter,
};
use phez_core::error::RepoError;
use phez_core::ports::{CommentStore, CommunityService, PostRepository, VoteLedger};

use super::entity::comment::{self, Entity as CommentEntity, POST_COMMENTABLE};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::subphez::Entity as SubphezEntity;
use super::entity::subphez_moderator::Entity as ModeratorEntity;
use super::entity::subscription::{self, Entity as SubscriptionEntity};
use super::entity::vote::{self, Entity as VoteEntity};
use super::postgres_base::{PostgresBaseRepository, db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

impl PostgresPostRepository {
    async fn fetch_page(
        &self,
        query: Select<PostEntity>,
        order: PostOrder,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let query = match order {
            PostOrder::Latest => query.order_by_desc(post::Column::CreatedAt),
            PostOrder::Points => query.order_by_desc(post::Column::Points),
            PostOrder::Hot => query.order_by_desc(post::Column::HotScore),
        };

        let paginator = query.paginate(&self.db, PER_PAGE);
        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator.fetch_page(page.index()).await.map_err(db_err)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new_post.title),
            body: Set(new_post.body),
            url: Set(new_post.url),
            is_self: Set(new_post.is_self),
            guid: Set(new_post.guid),
            user_id: Set(new_post.user_id),
            subphez_id: Set(new_post.subphez_id),
            points: Set(0),
            hot_score: Set(0.0),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        tracing::debug!(post_id = %model.id, "Post row inserted");
        Ok(model.into())
    }

    async fn list(&self, order: PostOrder, page: PageRequest) -> Result<Page<Post>, RepoError> {
        self.fetch_page(PostEntity::find(), order, page).await
    }

    async fn list_in_subphezes(
        &self,
        subphez_ids: &[Uuid],
        order: PostOrder,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let query =
            PostEntity::find().filter(post::Column::SubphezId.is_in(subphez_ids.iter().copied()));
        self.fetch_page(query, order, page).await
    }
}

#[derive(Debug, FromQueryResult)]
struct VoteSum {
    total: Option<i64>,
}

async fn sum_votes<C>(db: &C, post_id: Uuid, filter: VoteFilter) -> Result<i64, DbErr>
where
    C: ConnectionTrait,
{
    let query = VoteEntity::find()
        .select_only()
        .column_as(Expr::col(vote::Column::VoteValue).sum(), "total")
        .filter(vote::Column::PostId.eq(post_id));

    let query = match filter {
        VoteFilter::All => query,
        VoteFilter::Positive => query.filter(vote::Column::VoteValue.gt(0)),
        VoteFilter::Negative => query.filter(vote::Column::VoteValue.lt(0)),
    };

    let row = query.into_model::<VoteSum>().one(db).await?;
    Ok(row.and_then(|r| r.total).unwrap_or(0))
}

/// PostgreSQL vote ledger. Each cast runs in one transaction that also
/// refreshes `posts.points`.
pub struct PostgresVoteLedger {
    db: DbConn,
}

impl PostgresVoteLedger {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VoteLedger for PostgresVoteLedger {
    async fn cast(&self, user_id: Uuid, post_id: Uuid, value: i32) -> Result<Vote, RepoError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        VoteEntity::delete_many()
            .filter(vote::Column::PostId.eq(post_id))
            .filter(vote::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let model = vote::ActiveModel {
            id: Set(Uuid::new_v4()),
            post_id: Set(post_id),
            user_id: Set(user_id),
            vote_value: Set(value),
            created_at: Set(Utc::now().into()),
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        let points = sum_votes(&txn, post_id, VoteFilter::All)
            .await
            .map_err(db_err)?;
        PostEntity::update_many()
            .col_expr(post::Column::Points, Expr::value(points as i32))
            .filter(post::Column::Id.eq(post_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        tracing::debug!(%post_id, %user_id, value, points, "Vote recorded");
        Ok(model.into())
    }

    async fn sum(&self, post_id: Uuid, filter: VoteFilter) -> Result<i64, RepoError> {
        sum_votes(&self.db, post_id, filter).await.map_err(db_err)
    }
}

/// PostgreSQL comment counts.
pub struct PostgresCommentStore {
    db: DbConn,
}

impl PostgresCommentStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentStore for PostgresCommentStore {
    async fn count_for(&self, post_id: Uuid) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::CommentableId.eq(post_id))
            .filter(comment::Column::CommentableType.eq(POST_COMMENTABLE))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

/// PostgreSQL subphez lookups, moderator checks and subscriptions.
pub struct PostgresCommunityService {
    db: DbConn,
}

impl PostgresCommunityService {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommunityService for PostgresCommunityService {
    async fn find_subphez(&self, id: Uuid) -> Result<Option<Subphez>, RepoError> {
        let result = SubphezEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.map(Into::into))
    }

    async fn can_moderate(&self, subphez: &Subphez, user: &User) -> Result<bool, RepoError> {
        let assignment = ModeratorEntity::find_by_id((subphez.id, user.id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(assignment.is_some())
    }

    async fn subscribed_subphez_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let rows = SubscriptionEntity::find()
            .filter(subscription::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(|row| row.subphez_id).collect())
    }
}
