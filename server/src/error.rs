use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures a forum operation reports back to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForumError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Post not found")]
    NotFound,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ForumError {
    fn into_response(self) -> Response {
        let status = match self {
            ForumError::Validation(_) => StatusCode::BAD_REQUEST,
            ForumError::NotFound => StatusCode::NOT_FOUND,
        };

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// Errors that stop the server from starting or keep it from serving.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Config {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
