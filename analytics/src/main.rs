use std::sync::Arc;

use analytics::routes;
use analytics::state::AppState;
use analytics::store::JsonlStore;
use anyhow::{Context, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    shared::init_tracing!()?;
    let config = shared::load_server_config!()?;

    let store = JsonlStore::new(config.data_dir);
    info!("Serving records from {:?}", store.data_dir());

    let state = Arc::new(AppState::new(Arc::new(store)));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
    info!("Shutting down");
}
