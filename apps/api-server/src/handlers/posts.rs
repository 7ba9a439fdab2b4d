//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use phez_core::domain::{Page, PageRequest, Post, PostEdit, PostOrder, PostSubmission};
use phez_core::service::PostDetails;
use phez_shared::dto::{
    CreatePostRequest, ListOrder, ListPostsQuery, PageQuery, PageResponse, PostResponse,
    PostSummary, UpdatePostRequest, VoteRequest,
};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let ListPostsQuery { order, page } = query.into_inner();
    let page = state
        .posts
        .list(post_order(order), PageRequest::new(page.unwrap_or(1)))
        .await?;

    Ok(HttpResponse::Ok().json(page_response(page)))
}

/// GET /api/feed - posts from the caller's subscribed subphezes.
pub async fn feed(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let request = PageRequest::new(query.page.unwrap_or(1));
    let page = state.posts.list_for_subscriber(&identity.0, request).await?;

    Ok(HttpResponse::Ok().json(page_response(page)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let submission = PostSubmission {
        title: req.title,
        body: req.body,
        url: req.url,
        is_self: req.is_self,
        subphez_id: req.subphez_id,
    };

    let post = state.posts.create(&identity.0, submission).await?;
    let details = state.posts.details(post, Some(&identity.0)).await?;

    Ok(HttpResponse::Created().json(post_response(details)))
}

/// GET /api/posts/{id}
pub async fn show(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find(path.into_inner()).await?;
    let details = state.posts.details(post, identity.user()).await?;

    Ok(HttpResponse::Ok().json(post_response(details)))
}

/// PATCH /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let UpdatePostRequest { title, body } = body.into_inner();
    let post = state
        .posts
        .edit(&identity.0, path.into_inner(), PostEdit { title, body })
        .await?;
    let details = state.posts.details(post, Some(&identity.0)).await?;

    Ok(HttpResponse::Ok().json(post_response(details)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.posts.delete(&identity.0, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/votes
pub async fn vote(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<VoteRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .vote(&identity.0, path.into_inner(), body.value)
        .await?;
    let details = state.posts.details(post, Some(&identity.0)).await?;

    Ok(HttpResponse::Ok().json(post_response(details)))
}

fn post_order(order: ListOrder) -> PostOrder {
    match order {
        ListOrder::Latest => PostOrder::Latest,
        ListOrder::Points => PostOrder::Points,
        ListOrder::Hot => PostOrder::Hot,
    }
}

fn page_response(page: Page<Post>) -> PageResponse<PostSummary> {
    let total_pages = page.total_pages();
    let page = page.map(|post| PostSummary {
        domain: post.domain(),
        id: post.id,
        title: post.title,
        url: post.url,
        is_self: post.is_self,
        guid: post.guid,
        subphez_id: post.subphez_id,
        user_id: post.user_id,
        points: post.points,
        created_at: post.created_at,
    });

    PageResponse {
        items: page.items,
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        total_pages,
    }
}

fn post_response(details: PostDetails) -> PostResponse {
    let PostDetails {
        post,
        path,
        link,
        domain,
        encoded_url,
        rendered_body,
        vote_total,
        upvote_total,
        downvote_total,
        comment_count,
        editable,
        owned,
        moderatable,
    } = details;

    PostResponse {
        id: post.id,
        title: post.title,
        body: post.body,
        url: post.url,
        is_self: post.is_self,
        guid: post.guid,
        subphez_id: post.subphez_id,
        user_id: post.user_id,
        points: post.points,
        created_at: post.created_at,
        path,
        link,
        domain,
        encoded_url,
        rendered_body,
        vote_total,
        upvote_total,
        downvote_total,
        comment_count,
        editable,
        owned,
        moderatable,
    }
}
