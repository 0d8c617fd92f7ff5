// SPDX-License-Identifier: MIT

//! RunLytic API Server
//!
//! Serves marathon recommendations and proxies the marathon backend for the
//! RunLytic web client.

use runlytic::{
    config::Config,
    db::{FirestoreDb, MemoryPreferenceStore, PreferenceStore},
    services::BackendClient,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting RunLytic API");

    let backend = BackendClient::new(
        &config.backend_url,
        config.backend_timeout,
        config.backend_max_retries,
    )?;
    tracing::info!(
        url = %config.backend_url,
        timeout_secs = config.backend_timeout.as_secs(),
        max_retries = config.backend_max_retries,
        "Backend client initialized"
    );

    // Preferences live in Firestore when a project is configured
    let preferences: Arc<dyn PreferenceStore> = match &config.gcp_project_id {
        Some(project_id) => Arc::new(FirestoreDb::new(project_id).await?),
        None => {
            tracing::warn!("GCP_PROJECT_ID not set, preferences are kept in memory");
            Arc::new(MemoryPreferenceStore::new())
        }
    };

    let state = Arc::new(AppState::new(config.clone(), Arc::new(backend), preferences));

    // Build router
    let app = runlytic::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("runlytic=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
