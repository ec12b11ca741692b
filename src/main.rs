// =============================================================================
// Meridian Stock Insight — Main Entry Point
// =============================================================================
//
// Request-driven analysis service: the REST layer fetches a ticker's daily
// history on demand, runs the pure analysis pipeline, and returns the
// recommendation. No background loops, no persistent state.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod analysis;
mod api;
mod app_state;
mod forecast;
mod indicators;
mod market_data;
mod recommendation;
mod runtime_config;
mod types;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::runtime_config::RuntimeConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        Meridian Stock Insight — Starting Up              ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let config_path =
        std::env::var("MERIDIAN_CONFIG").unwrap_or_else(|_| "meridian_config.json".into());
    let mut config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    // Override the bind address from env if available.
    if let Ok(addr) = std::env::var("MERIDIAN_BIND_ADDR") {
        config.bind_addr = addr;
    }

    info!(
        data_range = %config.data_range,
        min_history_bars = config.min_history_bars,
        horizon = config.forecast_horizon_days,
        "Analysis engine configured"
    );

    // ── 2. Build shared state ────────────────────────────────────────────
    let state = Arc::new(AppState::new(config));

    // ── 3. Start the API server ──────────────────────────────────────────
    let bind_addr = state.runtime_config.read().bind_addr.clone();
    let app = api::rest::router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server to {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");
    axum::serve(listener, app).await.context("API server failed")?;

    Ok(())
}
