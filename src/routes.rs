use crate::handlers::{chat_handler, health_check, search_handler};
use axum::{Router, routing::get, routing::post};

/// Creates and configures all application routes
pub fn create_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/search", post(search_handler))
        .route("/api/chat", post(chat_handler))
}
