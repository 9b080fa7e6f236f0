//! journal-server - Journal backend server
//!
//! REST API for journal entries and LLM-backed entry analysis.

use anyhow::Context;
use journal_core::{ChatCompletion, Database, llm::OpenAiClient};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod error;
mod routes;
mod state;

/// Log directives used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "journal_server=info,journal_core=info,tower_http=debug";

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(log_filter())
        .init();

    info!("journal-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = config::Config::load()?;
    info!("Config loaded from {:?}", config.config_path);

    let db_path = config.database_path();
    let db = Database::open_path(&db_path)
        .with_context(|| format!("Failed to open database at {:?}", db_path))?;
    info!("Database opened: {:?}", db_path);

    let llm = OpenAiClient::new(&config.llm)?;
    if !llm.is_configured() {
        warn!("AZURE_OPENAI_API_KEY not set; entry analysis will be unavailable");
    }

    let bind_addr = config.server.bind_addr.clone();
    let state = state::AppState::new(config, db, Arc::new(llm));
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
