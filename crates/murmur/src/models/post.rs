//! Post models and feed filters.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Server-assigned post id.
    pub id: String,
    /// Id of the author.
    pub user_id: String,
    /// Post body text.
    pub text: String,
    /// URLs of attached images.
    #[serde(default)]
    pub images: Vec<String>,
    /// Latitude of the attached location, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude of the attached location, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Tags attached to the post.
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// When the post disappears, if it is ephemeral.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Alias of the author at posting time.
    pub user_alias: String,
    /// The requesting user's vote on this post: `1`, `-1`, or absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user_vote: Option<i8>,
    /// Total up votes.
    pub upvotes: i64,
    /// Total down votes.
    pub downvotes: i64,
    /// Number of comments on the post.
    pub comment_count: i64,
}

/// Payload for creating a post.
///
/// Serialized as the JSON `post` part of the multipart create request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    /// Id of the author.
    pub user_id: String,
    /// Post body text.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewPost {
    /// Create a text-only post payload.
    pub fn new(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            text: text.into(),
            latitude: None,
            longitude: None,
            tags: None,
            expires_at: None,
        }
    }
}

/// Filters applied to the feed.
///
/// `latitude`, `longitude` and `radius` belong together; the server ignores
/// an incomplete location filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFilters {
    /// Full-text search over post bodies.
    pub search: Option<String>,
    /// Only posts carrying any of these tags.
    pub tags: Option<Vec<String>>,
    /// Center latitude for a location filter.
    pub latitude: Option<f64>,
    /// Center longitude for a location filter.
    pub longitude: Option<f64>,
    /// Radius in kilometers around the center.
    pub radius: Option<f64>,
}

impl PostFilters {
    /// True when no filter is set.
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.tags.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.radius.is_none()
    }
}

/// An image attached to a new post.
#[derive(Clone)]
pub struct ImageUpload {
    /// File name reported to the server.
    pub filename: String,
    /// MIME type of the image data.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Create an upload, guessing the MIME type from the filename extension.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = guess_mime(&filename);
        Self {
            filename,
            content_type,
            bytes,
        }
    }

    /// Create an upload with an explicit MIME type.
    pub fn with_content_type(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

// Keep image bytes out of Debug output
impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

/// Guess an image MIME type from a filename, defaulting to JPEG.
fn guess_mime(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            format!("image/{}", ext.to_ascii_lowercase())
        }
        _ => "image/jpeg".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_optional_fields_absent() {
        let json = r#"{
            "id": "p-1",
            "userId": "u-1",
            "text": "first murmur",
            "createdAt": "2024-01-15T10:30:00Z",
            "userAlias": "MaskedVoice7",
            "upvotes": 3,
            "downvotes": 1,
            "commentCount": 0
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.images.is_empty());
        assert!(post.tags.is_empty());
        assert_eq!(post.latitude, None);
        assert_eq!(post.current_user_vote, None);
        assert_eq!(post.expires_at, None);
    }

    #[test]
    fn new_post_omits_unset_fields() {
        let post = NewPost::new("u-1", "hello");
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userId"], "u-1");
        assert_eq!(json["text"], "hello");
        assert!(json.get("latitude").is_none());
        assert!(json.get("tags").is_none());
        assert!(json.get("expiresAt").is_none());
    }

    #[test]
    fn empty_filters() {
        assert!(PostFilters::default().is_empty());
        let filters = PostFilters {
            search: Some("cats".to_string()),
            ..Default::default()
        };
        assert!(!filters.is_empty());
    }

    #[test]
    fn guesses_mime_from_extension() {
        let upload = ImageUpload::new("photo.png", vec![1, 2, 3]);
        assert_eq!(upload.content_type, "image/png");

        let upload = ImageUpload::new("photo.JPG", vec![]);
        assert_eq!(upload.content_type, "image/jpg");

        let upload = ImageUpload::new("no-extension", vec![]);
        assert_eq!(upload.content_type, "image/jpeg");
    }

    #[test]
    fn debug_hides_image_bytes() {
        let upload = ImageUpload::new("photo.png", vec![0; 4096]);
        let debug = format!("{:?}", upload);
        assert!(debug.contains("4096 bytes"));
        assert!(!debug.contains("[0,"));
    }
}
