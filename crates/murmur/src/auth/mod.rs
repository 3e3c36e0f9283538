//! Session credential primitives.
//!
//! This module provides credential types, the token storage abstraction,
//! and the hook fired when a session can no longer be refreshed.

mod credentials;
mod hook;
mod token_store;
mod tokens;

pub use credentials::{LoginCredentials, RegisterCredentials, random_alias};
pub use hook::{NoopHook, SessionHook};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenKey, TokenStore};
pub use tokens::AuthTokens;
