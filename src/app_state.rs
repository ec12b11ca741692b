// =============================================================================
// Central Application State — Meridian analysis service
// =============================================================================
//
// Ties the configuration and the market-data client together for the REST
// layer. The analysis engine itself is stateless (every request runs a fresh
// pipeline), so the shared state stays deliberately small.
//
// Thread safety:
//   - Atomic counter for lock-free request tracking.
//   - parking_lot::RwLock around the (rarely read-modified) configuration.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::market_data::YahooClient;
use crate::runtime_config::RuntimeConfig;

/// Central application state shared across handlers via `Arc<AppState>`.
pub struct AppState {
    pub runtime_config: Arc<RwLock<RuntimeConfig>>,
    pub market: YahooClient,
    /// Number of analyses served since startup (exposed on /health).
    pub analyses_served: AtomicU64,
}

impl AppState {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            runtime_config: Arc::new(RwLock::new(config)),
            market: YahooClient::new(),
            analyses_served: AtomicU64::new(0),
        }
    }

    /// Record one served analysis and return the new total.
    pub fn record_analysis(&self) -> u64 {
        self.analyses_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn analyses_served(&self) -> u64 {
        self.analyses_served.load(Ordering::Relaxed)
    }
}
