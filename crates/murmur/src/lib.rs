//! murmur - Client library for the murmur anonymous social feed.
//!
//! This library provides the full client stack for a murmur backend: an
//! authenticated request gateway with transparent token refresh, durable
//! credential storage, and state stores for sessions, the post feed, and
//! comment threads. All network operations flow through [`ApiClient`],
//! which retries a rejected call exactly once after refreshing the stored
//! token pair.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use murmur::{ApiClient, ApiUrl, AuthStore, LoginCredentials, MemoryTokenStore, NoopHook, PostsStore};
//!
//! # async fn example() -> Result<(), murmur::Error> {
//! let base = ApiUrl::new("https://api.murmur.example")?;
//! let api = ApiClient::new(base, Arc::new(MemoryTokenStore::new()), Arc::new(NoopHook));
//!
//! let auth = AuthStore::new(api.clone());
//! let user = auth.login(&LoginCredentials::new("ghost@example.com", "hunter2")).await?;
//! println!("signed in as {}", user.alias);
//!
//! let posts = PostsStore::new(api);
//! posts.refresh_feed().await?;
//! for post in posts.posts() {
//!     println!("{}: {}", post.user_alias, post.text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod error;
pub mod models;
pub mod store;
pub mod types;

// Re-export primary types at crate root for convenience
pub use api::{ApiClient, ApiRequest, MultipartForm, Payload};
pub use auth::{
    AuthTokens, FileTokenStore, LoginCredentials, MemoryTokenStore, NoopHook, RegisterCredentials,
    SessionHook, TokenKey, TokenStore, random_alias,
};
pub use error::Error;
pub use models::{
    Comment, ImageUpload, NewComment, NewPost, Page, Pageable, Post, PostFilters, User, Vote,
    VoteDirection,
};
pub use store::{AuthStore, CommentsStore, PostsStore, SessionSnapshot};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
