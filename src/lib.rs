pub mod config;
pub mod db;
pub mod error;
mod handlers;
pub mod models;
pub mod store;
mod utils;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::Config;
pub use db::Db;

/// State shared by every handler.
pub struct HandlerState {
    pub db: Db,
}

pub fn create_app(db: Db) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api", get(handlers::get_endpoints))
        .route("/api/topics", get(handlers::get_topics))
        .route("/api/articles", get(handlers::get_articles))
        .route(
            "/api/articles/{article_id}",
            get(handlers::get_article_by_id).patch(handlers::patch_article_votes),
        )
        .route(
            "/api/articles/{article_id}/comments",
            get(handlers::get_comments_by_article_id).post(handlers::post_comment),
        )
        .route(
            "/api/comments/{comment_id}",
            delete(handlers::delete_comment_by_id),
        )
        .route("/api/users", get(handlers::get_users))
        .fallback(handlers::path_not_found)
        .method_not_allowed_fallback(handlers::path_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(HandlerState { db }))
}
