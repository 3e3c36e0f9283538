//! API endpoint definitions and request/query types.

use serde::{Deserialize, Serialize};

use crate::models::PostFilters;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// POST /auth/register
pub const REGISTER: &str = "/auth/register";

/// POST /auth/login
pub const LOGIN: &str = "/auth/login";

/// POST /auth/refresh
pub const REFRESH: &str = "/auth/refresh";

/// GET /users/me
pub const CURRENT_USER: &str = "/users/me";

/// GET /posts (listing), POST /posts (creation)
pub const POSTS: &str = "/posts";

/// PUT /votes
pub const VOTES: &str = "/votes";

/// POST /comments
pub const COMMENTS: &str = "/comments";

/// GET /posts/{id}, DELETE /posts/{id}
pub fn post_by_id(id: &str) -> String {
    format!("/posts/{id}")
}

/// GET /comments/post/{postId}
pub fn comments_for_post(post_id: &str) -> String {
    format!("/comments/post/{post_id}")
}

/// DELETE /comments/{id}
pub fn comment_by_id(id: &str) -> String {
    format!("/comments/{id}")
}

// ============================================================================
// Request/Query Types
// ============================================================================

/// Request body for /auth/refresh.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Error body shape used by the server for non-success responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

/// Query string for GET /posts.
#[derive(Debug, Serialize)]
pub struct FeedQuery {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Comma-joined tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl FeedQuery {
    pub fn new(page: u32, size: u32, filters: &PostFilters) -> Self {
        Self {
            page,
            size,
            search: filters.search.clone(),
            tags: filters
                .tags
                .as_ref()
                .filter(|tags| !tags.is_empty())
                .map(|tags| tags.join(",")),
            latitude: filters.latitude,
            longitude: filters.longitude,
            radius: filters.radius,
        }
    }
}

/// Query string for plain paginated listings.
#[derive(Debug, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
}

/// Query string for delete endpoints that authorize by user id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery<'a> {
    pub user_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_query_joins_tags() {
        let filters = PostFilters {
            search: Some("coffee".to_string()),
            tags: Some(vec!["food".to_string(), "local".to_string()]),
            ..Default::default()
        };
        let query = FeedQuery::new(0, 10, &filters);
        let encoded = serde_urlencoded::to_string(&query).unwrap();
        assert_eq!(encoded, "page=0&size=10&search=coffee&tags=food%2Clocal");
    }

    #[test]
    fn feed_query_skips_empty_filters() {
        let query = FeedQuery::new(2, 25, &PostFilters::default());
        let encoded = serde_urlencoded::to_string(&query).unwrap();
        assert_eq!(encoded, "page=2&size=25");
    }

    #[test]
    fn user_query_uses_camel_case() {
        let encoded = serde_urlencoded::to_string(UserQuery { user_id: "u-1" }).unwrap();
        assert_eq!(encoded, "userId=u-1");
    }
}
