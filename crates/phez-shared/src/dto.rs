//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to submit a post. Exactly one of `body` and `url` is expected,
/// depending on `is_self`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub is_self: bool,
    pub subphez_id: Uuid,
}

/// Request to edit a self post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Request to cast a vote: `1` or `-1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub value: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListOrder {
    #[default]
    Latest,
    Points,
    Hot,
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub order: ListOrder,
    #[serde(default)]
    pub page: Option<u64>,
}

/// Query string of `GET /api/feed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u64>,
}

/// A post as it appears in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub url: Option<String>,
    pub is_self: bool,
    pub guid: String,
    pub subphez_id: Uuid,
    pub user_id: Uuid,
    pub points: i32,
    pub domain: String,
    pub created_at: DateTime<Utc>,
}

/// A single post with every derived field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub url: Option<String>,
    pub is_self: bool,
    pub guid: String,
    pub subphez_id: Uuid,
    pub user_id: Uuid,
    pub points: i32,
    pub created_at: DateTime<Utc>,
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

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListPostsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.order, ListOrder::Latest);
        assert_eq!(query.page, None);

        let query: ListPostsQuery = serde_json::from_str(r#"{"order":"hot","page":3}"#).unwrap();
        assert_eq!(query.order, ListOrder::Hot);
        assert_eq!(query.page, Some(3));
    }

    #[test]
    fn test_create_request_optional_fields() {
        let json = format!(
            r#"{{"title":"Hi","is_self":false,"url":"example.com","subphez_id":"{}"}}"#,
            Uuid::nil()
        );
        let request: CreatePostRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(request.body, None);
        assert_eq!(request.url.as_deref(), Some("example.com"));
    }
}
