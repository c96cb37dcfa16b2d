// Cookbook - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use cookbook::{build_router, logging, Cookbook, ServerConfig};
use tracing::info;

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;
    logging::init(&config.log_filter);

    // The cookbook lives as long as the process; it starts empty
    let app = build_router(Cookbook::new());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!(version = cookbook::VERSION, "🍳 Cookbook server running on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
