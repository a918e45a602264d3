use std::sync::Arc;

use axum::{Extension, response::Json as ResponseJson};
use tracing::{debug, info};

use crate::chat::chat_reply;
use crate::error::AppResult;
use crate::extract::PermissiveJson;
use crate::models::{ChatRequest, ChatResponse, HealthResponse, SearchRequest, SearchResponse};
use crate::resolver::QueryResolver;

/// Health check handler
/// Returns the service status and, when a provider is in use, whether it is reachable.
/// Always 200: an unreachable provider only degrades answers to the default.
pub async fn health_check(
    Extension(resolver): Extension<Arc<QueryResolver>>,
) -> AppResult<ResponseJson<HealthResponse>> {
    debug!("Health check endpoint called");

    let response = match resolver.provider_health().await {
        Some(health) => {
            info!("Provider {} healthy: {}", health.name, health.healthy);
            HealthResponse::ok().with_provider(health.name, health.healthy)
        }
        None => HealthResponse::ok(),
    };
    Ok(ResponseJson(response))
}

/// Search handler
/// Resolves the query against the topic table (and provider, when enabled).
/// Every parseable body gets an answer.
pub async fn search_handler(
    Extension(resolver): Extension<Arc<QueryResolver>>,
    PermissiveJson(payload): PermissiveJson<SearchRequest>,
) -> AppResult<ResponseJson<SearchResponse>> {
    info!("Search endpoint called with query: {:?}", payload.query);

    let resolution = resolver.resolve(&payload.query).await;

    info!("Answered from {:?}", resolution.source);
    Ok(ResponseJson(SearchResponse::new(resolution.answer)))
}

/// Chat handler
/// Echoes the message back inside the chat reply template
pub async fn chat_handler(
    PermissiveJson(payload): PermissiveJson<ChatRequest>,
) -> AppResult<ResponseJson<ChatResponse>> {
    info!("Chat endpoint called with message: {:?}", payload.message);

    Ok(ResponseJson(ChatResponse::new(chat_reply(&payload.message))))
}
