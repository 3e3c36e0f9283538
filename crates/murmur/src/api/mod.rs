//! Authenticated request gateway.
//!
//! This module provides the HTTP client all murmur calls go through,
//! including bearer attachment, the one-shot refresh-and-retry cycle, and
//! multipart upload support.

mod client;
pub(crate) mod endpoints;
mod multipart;

pub use client::{ApiClient, ApiRequest, Payload};
pub use multipart::MultipartForm;
