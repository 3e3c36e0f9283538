//! Error types for the murmur library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, server rejection, decoding, and credential
//! storage errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for murmur operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (expired session, missing credentials).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success responses from the API server.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Response body decoding errors.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Credential storage errors.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors (invalid URL, query, or body).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Check whether this error means the session is gone and the user
    /// must log in again.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Error::Auth(AuthError::SessionExpired))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP transport error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(DecodeError::new(err.to_string()))
        } else {
            Error::Transport(TransportError::from(err))
        }
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Session could not be refreshed; the user must log in again.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// No credentials are stored.
    #[error("not logged in")]
    NotLoggedIn,
}

/// A non-success response from the API server.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Error message, either from the response body or a generic fallback.
    pub message: String,
}

impl ApiError {
    /// Create a new API error, falling back to a generic message when the
    /// server did not provide one.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self {
            status,
            message: message.unwrap_or_else(|| format!("API error: {status}")),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

/// A response body that could not be decoded.
#[derive(Debug)]
pub struct DecodeError {
    /// What went wrong while decoding.
    pub message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The endpoint returned no body where one was required.
    pub fn empty_body(endpoint: &str) -> Self {
        Self {
            message: format!("empty response body from {endpoint}"),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DecodeError {}

/// Credential storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored data could not be parsed.
    #[error("malformed token data: {message}")]
    Malformed { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API URL format.
    #[error("invalid API URL '{value}': {reason}")]
    Url { value: String, reason: String },

    /// Invalid MIME type for a multipart file part.
    #[error("invalid MIME type '{value}': {reason}")]
    Mime { value: String, reason: String },

    /// Invalid header name or value.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// A query could not be encoded.
    #[error("invalid query: {reason}")]
    Query { reason: String },

    /// A request body could not be encoded.
    #[error("invalid request body: {reason}")]
    Body { reason: String },
}
