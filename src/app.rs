use std::sync::Arc;

use anyhow::Context;
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::provider::build_provider;
use crate::resolver::{QueryResolver, ResolveMode};
use crate::routes::create_routes;
use crate::topics::TopicTable;

/// Initialize tracing and logging for the application
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Loads the topic table and wires in the answer provider the config asks for
pub fn build_resolver(config: &Config) -> anyhow::Result<QueryResolver> {
    let table = match &config.topics_file {
        Some(path) => TopicTable::from_file(path)
            .with_context(|| format!("Failed to load topic table from {}", path.display()))?,
        None => {
            info!("No TOPICS_FILE set, using built-in topic table");
            TopicTable::builtin()
        }
    };

    let resolver = QueryResolver::new(Arc::new(table));
    if config.resolve_mode == ResolveMode::Table {
        return Ok(resolver);
    }

    let provider = build_provider(config).context("Failed to initialize answer provider")?;
    info!(
        "Answer provider {} enabled in {} mode (timeout {:?})",
        provider.name(),
        config.resolve_mode,
        config.provider_timeout
    );
    Ok(resolver.with_provider(provider, config.resolve_mode, config.provider_timeout))
}

/// Router with all routes and middleware around an existing resolver
pub fn router(resolver: QueryResolver) -> Router {
    Router::new()
        .merge(create_routes())
        .layer(Extension(Arc::new(resolver)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Create and configure the Axum application with all routes and middleware
pub fn create_app(config: &Config) -> anyhow::Result<Router> {
    info!("Initializing application router");

    let resolver = build_resolver(config)?;
    info!("Query resolver ready: {:?}", resolver);

    Ok(router(resolver))
}
