//! Error types for the forum API client.
//!
//! # Design
//! `NotFound` and `Validation` map the two failures the server reports on
//! purpose (404 and 400). Anything else non-2xx lands in `HttpError` with the
//! raw status code and body for debugging.

use thiserror::Error;

/// Errors returned by `ForumClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested post does not exist.
    #[error("post not found")]
    NotFound,

    /// The payload was rejected, either locally before sending or by the
    /// server with a 400.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The server returned a non-2xx status other than 400 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
