//! In-memory post store.
//!
//! Posts live in a `BTreeMap` keyed by id. Ids only ever grow, so map order is
//! creation order, which keeps the vote sort stable across ties. Both id
//! sequences are explicit counters: `next_id` for posts and a per-post
//! `next_reply_id` for replies.

use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::RwLock;

use crate::error::ForumError;
use crate::models::{Post, PostDraft, Reply, ReplyDraft};

/// Store handle shared by every request handler. Mutations hold the write
/// lock for the whole read-modify-write.
pub type SharedStore = Arc<RwLock<PostStore>>;

#[derive(Debug, Clone)]
struct Entry {
    post: Post,
    next_reply_id: u64,
}

#[derive(Debug, Clone)]
pub struct PostStore {
    posts: BTreeMap<u64, Entry>,
    next_id: u64,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore {
    /// An empty store. The first post created gets id 1.
    pub fn new() -> Self {
        Self {
            posts: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// The store the server starts with: two posts, the first with two replies.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.insert_existing(Post {
            id: 1,
            title: "How do I deploy Node.js on Cloud Run?".to_string(),
            content: "I'm new to Google Cloud and need help deploying.".to_string(),
            votes: 5,
            author: "Rohan".to_string(),
            replies: vec![
                Reply {
                    id: 1,
                    text: "Use gcloud CLI with region flag".to_string(),
                },
                Reply {
                    id: 2,
                    text: "Enable Cloud Build first!".to_string(),
                },
            ],
        });
        store.insert_existing(Post {
            id: 2,
            title: "What is the difference between React and Node.js?".to_string(),
            content: "Aren't they both JavaScript?".to_string(),
            votes: 10,
            author: "Jane".to_string(),
            replies: Vec::new(),
        });
        store
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// All posts, most votes first. Equal vote counts keep creation order.
    pub fn list_posts(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().map(|e| e.post.clone()).collect();
        posts.sort_by(|a, b| b.votes.cmp(&a.votes));
        posts
    }

    pub fn create_post(&mut self, draft: PostDraft) -> Post {
        let id = self.next_id;
        self.next_id += 1;

        let post = Post {
            id,
            title: draft.title,
            content: draft.content,
            votes: 0,
            author: draft.author,
            replies: Vec::new(),
        };
        self.posts.insert(
            id,
            Entry {
                post: post.clone(),
                next_reply_id: 1,
            },
        );
        post
    }

    pub fn get_post(&self, id: u64) -> Result<Post, ForumError> {
        self.posts
            .get(&id)
            .map(|e| e.post.clone())
            .ok_or(ForumError::NotFound)
    }

    /// Append a reply and return the whole parent post.
    pub fn add_reply(&mut self, post_id: u64, draft: ReplyDraft) -> Result<Post, ForumError> {
        let entry = self.posts.get_mut(&post_id).ok_or(ForumError::NotFound)?;
        let id = entry.next_reply_id;
        entry.next_reply_id += 1;
        entry.post.replies.push(Reply {
            id,
            text: draft.text,
        });
        Ok(entry.post.clone())
    }

    pub fn upvote_post(&mut self, post_id: u64) -> Result<Post, ForumError> {
        let entry = self.posts.get_mut(&post_id).ok_or(ForumError::NotFound)?;
        entry.post.votes += 1;
        Ok(entry.post.clone())
    }

    fn insert_existing(&mut self, post: Post) {
        let next_reply_id = post.replies.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        self.next_id = self.next_id.max(post.id + 1);
        self.posts.insert(
            post.id,
            Entry {
                post,
                next_reply_id,
            },
        );
    }
}
