//! Domain models for the murmur API.
//!
//! All wire structs use camelCase field names to match the server's JSON.

mod comment;
mod page;
mod post;
mod user;
mod vote;

pub use comment::{Comment, NewComment};
pub use page::{Page, Pageable};
pub use post::{ImageUpload, NewPost, Post, PostFilters};
pub use user::User;
pub use vote::{Vote, VoteDirection};
