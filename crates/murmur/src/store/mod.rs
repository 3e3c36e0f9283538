//! Application state stores.
//!
//! Stores own the client-side view of server state and are the intended
//! callers of the request gateway. Errors surface to the embedding UI
//! except where a store's own policy says otherwise.

mod auth;
mod comments;
mod posts;

pub use auth::{AuthStore, SessionSnapshot};
pub use comments::CommentsStore;
pub use posts::{DEFAULT_PAGE_SIZE, PostsStore};
