//! Comment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    /// Alias of the comment author.
    pub user_alias: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a comment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: String,
    pub user_id: String,
    pub text: String,
}

impl NewComment {
    pub fn new(
        post_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            post_id: post_id.into(),
            user_id: user_id.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_comment_serializes_camel_case() {
        let comment = NewComment::new("p-1", "u-1", "nice murmur");
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["postId"], "p-1");
        assert_eq!(json["userId"], "u-1");
        assert_eq!(json["text"], "nice murmur");
    }
}
