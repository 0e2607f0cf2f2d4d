//! HTTP API for a small discussion forum.
//!
//! Posts and their replies live in an in-memory [`PostStore`] shared by every
//! handler through axum state. Nothing survives a restart.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use std::future::Future;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::Config;
pub use error::{ForumError, ServerError};
pub use models::{NewPost, NewReply, Post, Reply};
pub use store::{PostStore, SharedStore};

/// Router over a freshly seeded store.
pub fn app() -> Router {
    router(PostStore::seeded().into_shared())
}

pub fn router(store: SharedStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", get(routes::root))
        .route("/posts", get(routes::list_posts).post(routes::create_post))
        .route("/posts/{id}", get(routes::get_post))
        .route("/posts/{id}/reply", post(routes::add_reply))
        .route("/posts/{id}/upvote", post(routes::upvote_post))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve `store` until `shutdown` resolves, then finish in-flight requests.
pub async fn run_until<F>(
    listener: TcpListener,
    store: SharedStore,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await
}
