pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::reply::handlers;
use crate::state::AppState;

/// Resume and cover-letter uploads share one request.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Reply API
        .route("/api/v1/replies/preview", post(handlers::handle_preview))
        .route("/api/v1/replies/generate", post(handlers::handle_generate))
        .route("/api/v1/replies/rewrite", post(handlers::handle_rewrite))
        .route("/api/v1/replies/last", get(handlers::handle_last_reply))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
