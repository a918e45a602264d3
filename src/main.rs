use rs_answer_svc::app::{create_app, init_tracing};
use rs_answer_svc::config::{Config, DEFAULT_LOG_FILTER};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(DEFAULT_LOG_FILTER);
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    info!("Starting RS Answer Service...");
    info!("Configuration loaded: {:?}", config);

    // Create the application
    let app = match create_app(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to create app: {:#}", e);
            std::process::exit(1);
        }
    };

    // Create TCP listener
    let listener = match tokio::net::TcpListener::bind(&config.bind_address()).await {
        Ok(listener) => {
            info!("Server running on {}", config.server_url());
            info!("Health check: GET /health");
            info!("Search endpoint: POST /api/search");
            info!("Chat endpoint: POST /api/chat");
            listener
        }
        Err(e) => {
            error!("Failed to bind to {}: {}", config.bind_address(), e);
            std::process::exit(1);
        }
    };

    // Start the server
    info!("Server starting...");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    } else {
        info!("Server shutdown gracefully");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
