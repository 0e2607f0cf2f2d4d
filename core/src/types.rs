//! Domain DTOs for the forum API.
//!
//! # Design
//! These mirror the server's wire schema but are defined independently so
//! the client does not depend on axum. Integration tests catch any schema
//! drift between the two crates.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A post returned by the API, with its replies in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub votes: u64,
    pub author: String,
    pub replies: Vec<Reply>,
}

/// A reply. Ids are only unique within the parent post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reply {
    pub id: u64,
    pub text: String,
}

/// Request payload for creating a post. `author` is omitted from the JSON
/// when unset and the server fills in "Anonymous".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// Request payload for replying to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReply {
    pub text: String,
}

impl NewPost {
    /// Reject empty fields before a request is built.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.is_empty() || self.content.is_empty() {
            return Err(ApiError::Validation(
                "Title and content are required".to_string(),
            ));
        }
        Ok(())
    }
}

impl NewReply {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.text.is_empty() {
            return Err(ApiError::Validation("Reply text is required".to_string()));
        }
        Ok(())
    }
}
