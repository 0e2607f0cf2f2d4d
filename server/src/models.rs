//! Wire types for posts and replies, plus the typed request bodies that are
//! checked at the HTTP boundary before anything reaches the store.

use serde::{Deserialize, Serialize};

use crate::error::ForumError;

pub const DEFAULT_AUTHOR: &str = "Anonymous";

pub const POST_FIELDS_REQUIRED: &str = "Title and content are required";
pub const REPLY_TEXT_REQUIRED: &str = "Reply text is required";

/// A forum post with its replies in the order they were added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub votes: u64,
    pub author: String,
    pub replies: Vec<Reply>,
}

/// A reply. Its id is only unique within the parent post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: u64,
    pub text: String,
}

/// Body of `POST /posts`. Every field is optional at the serde level so a
/// missing field surfaces as a 400 instead of a rejection from the extractor.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

/// Body of `POST /posts/{id}/reply`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewReply {
    pub text: Option<String>,
}

/// A post body that passed validation. Only `NewPost::validate` builds one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostDraft {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: String,
}

/// Reply text that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyDraft {
    pub(crate) text: String,
}

impl NewPost {
    pub fn validate(self) -> Result<PostDraft, ForumError> {
        match (present(self.title), present(self.content)) {
            (Some(title), Some(content)) => Ok(PostDraft {
                title,
                content,
                author: present(self.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            }),
            _ => Err(ForumError::Validation(POST_FIELDS_REQUIRED)),
        }
    }
}

impl NewReply {
    pub fn validate(self) -> Result<ReplyDraft, ForumError> {
        present(self.text)
            .map(|text| ReplyDraft { text })
            .ok_or(ForumError::Validation(REPLY_TEXT_REQUIRED))
    }
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
