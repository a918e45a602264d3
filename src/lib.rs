pub mod app;
pub mod chat;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod provider;
pub mod resolver;
pub mod routes;
pub mod theme;
pub mod topics;

// Re-export key functions for convenience
pub use app::{create_app, init_tracing, router};
pub use resolver::{AnswerSource, ProviderHealth, QueryResolver, Resolution, ResolveMode};
pub use topics::TopicTable;
