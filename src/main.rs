// =============================================================================
// TradePro Technical Analysis API — Main Entry Point
// =============================================================================
//
// Serves SMA/EMA-based indicators (RSI, MACD, Bollinger Bands) over HTTP. The
// indicator engine is pure; this binary only wires configuration, logging and
// the Axum router together.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod analysis;
mod api;
mod app_state;
mod indicators;
mod runtime_config;
mod types;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::runtime_config::RuntimeConfig;

const DEFAULT_CONFIG_PATH: &str = "tradepro_config.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path =
        std::env::var("TRADEPRO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let mut config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    if let Ok(addr) = std::env::var("TRADEPRO_BIND_ADDR") {
        config.bind_addr = addr;
    }

    info!(defaults = ?config.defaults, "Indicator defaults");

    // ── 2. Shared state & router ─────────────────────────────────────────
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config));
    let app = api::rest::router(state);

    // ── 3. Serve until Ctrl+C ────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server to {bind_addr}"))?;
    info!(addr = %bind_addr, "TradePro analysis API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("TradePro analysis API shut down complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received — stopping gracefully");
}
