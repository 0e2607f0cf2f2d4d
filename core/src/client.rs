//! Stateless HTTP request builder and response parser for the forum API.
//!
//! # Design
//! `ForumClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewPost, NewReply, Post};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Synchronous, stateless client for the forum API.
#[derive(Debug, Clone)]
pub struct ForumClient {
    base_url: String,
}

impl Default for ForumClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ForumClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        self.get(format!("{}/posts", self.base_url))
    }

    pub fn build_get_post(&self, id: u64) -> HttpRequest {
        self.get(format!("{}/posts/{id}", self.base_url))
    }

    /// Fails with `ApiError::Validation` if title or content is empty.
    pub fn build_create_post(&self, input: &NewPost) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        json_post(format!("{}/posts", self.base_url), input)
    }

    /// Fails with `ApiError::Validation` if the reply text is empty.
    pub fn build_add_reply(&self, post_id: u64, input: &NewReply) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        json_post(format!("{}/posts/{post_id}/reply", self.base_url), input)
    }

    pub fn build_upvote_post(&self, post_id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/posts/{post_id}/upvote", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_add_reply(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_upvote_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        parse_json(response, 200)
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }
}

fn json_post<T: serde::Serialize>(path: String, input: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method: HttpMethod::Post,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => Err(ApiError::Validation(error_message(&response.body))),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

/// The `error` field of a JSON error body, or the raw body if it has none.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string())
}
