//! Delivery Service
//!
//! Last-mile delivery coordination: ingests orders from the event bus,
//! assigns them to couriers and drives couriers toward their destinations.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use delivery::config::Config;
use delivery::di::AppState;
use delivery::infrastructure::http;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        e
    })?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("Starting Delivery Service...");

    // Initialize application state
    let state = Arc::new(AppState::new(&config).await.map_err(|e| {
        error!(error = %e, "Failed to initialize application state");
        e
    })?);

    // Start background consumers (basket confirmations from Kafka)
    if let Err(e) = state.start_consumers().await {
        warn!(error = %e, "Failed to start Kafka consumer (continuing without event-bus ingress)");
    }

    // Start the assignment and movement jobs
    state.start_jobs();

    // Handle graceful shutdown
    let state_for_shutdown = state.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for ctrl-c signal");
            return;
        }
        info!("Received shutdown signal");
        state_for_shutdown.shutdown();
    });

    // Serve the HTTP API until shutdown
    let shutdown_rx = state.shutdown_tx.subscribe();
    http::start_server(&config.http_addr, state.clone(), shutdown_rx).await?;

    Ok(())
}
