//! Inline Roll Commands server
//!
//! Serves a JSON world over HTTP:
//! - Renders inline roll markers in text as roll buttons
//! - Dispatches button clicks to roll requests for the selected tokens
//! - Migrates stored documents and compendium packs to the native roll syntax

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inline_roll_cmd::infrastructure::config::AppConfig;
use inline_roll_cmd::infrastructure::http;
use inline_roll_cmd::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inline_roll_cmd=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting inline roll command server");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  World file: {}", config.world_file.display());
    tracing::info!("  Persist changes: {}", config.persist_changes);
    tracing::info!("  Migration chunk size: {}", config.migration_chunk_size);

    let port = config.server_port;
    let state = Arc::new(AppState::new(config).await?);
    tracing::info!(
        enrichers = state.enricher.len(),
        "Application state initialized"
    );

    // Build the router
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(http::create_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
