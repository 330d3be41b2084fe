// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Kings Head site API server
//!
//! Serves Facebook posts and events for the pub's website and keeps the
//! page access token refreshed.

use kingshead_api::{config::Config, db::TokenStore, services::spawn_refresh_task, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        page_id = %config.page_id,
        store = ?config.store_backend,
        "Starting Kings Head site API"
    );

    if config.default_token.is_empty() {
        tracing::warn!("FACEBOOK_LONG_LIVED_TOKEN not set, content will fall back until a token is stored");
    }

    let store = TokenStore::from_config(&config).await?;
    let state = Arc::new(AppState::new(config.clone(), store)?);

    let refresh_task = spawn_refresh_task(state.tokens.clone(), config.refresh_interval);

    // Build router
    let app = kingshead_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(task) = refresh_task {
        task.abort();
    }
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kingshead_api=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
