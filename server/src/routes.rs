use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::error::ForumError;
use crate::models::{NewPost, NewReply, Post};
use crate::store::SharedStore;

pub const LIVENESS_MESSAGE: &str = "Learnato Discussion Forum API is running!";

pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

pub async fn list_posts(State(store): State<SharedStore>) -> Json<Vec<Post>> {
    let posts = store.read().await.list_posts();
    Json(posts)
}

pub async fn create_post(
    State(store): State<SharedStore>,
    body: Result<Json<NewPost>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), ForumError> {
    let draft = body_or_default(body).validate()?;
    let post = store.write().await.create_post(draft);
    info!(post_id = post.id, author = %post.author, "created post");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
) -> Result<Json<Post>, ForumError> {
    let id = parse_post_id(&raw_id).ok_or(ForumError::NotFound)?;
    let post = store.read().await.get_post(id)?;
    Ok(Json(post))
}

pub async fn add_reply(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
    body: Result<Json<NewReply>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), ForumError> {
    // The body is checked before the post lookup, so a bad body on an unknown
    // post is a 400.
    let draft = body_or_default(body).validate()?;
    let id = parse_post_id(&raw_id).ok_or(ForumError::NotFound)?;
    let post = store.write().await.add_reply(id, draft)?;
    info!(post_id = post.id, replies = post.replies.len(), "added reply");
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn upvote_post(
    State(store): State<SharedStore>,
    Path(raw_id): Path<String>,
) -> Result<Json<Post>, ForumError> {
    let id = parse_post_id(&raw_id).ok_or(ForumError::NotFound)?;
    let post = store.write().await.upvote_post(id)?;
    info!(post_id = post.id, votes = post.votes, "upvoted post");
    Ok(Json(post))
}

/// Lenient integer parse of a path id: leading whitespace and an optional `+`
/// are skipped, then the leading run of digits is used (`"12abc"` is 12).
/// `None` means no post can match.
pub fn parse_post_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

/// A body that is missing, not JSON, or mistyped is handled as `{}` so it
/// fails field validation with a 400.
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            debug!(%rejection, "unreadable request body, treating as empty");
            T::default()
        }
    }
}
