// =============================================================================
// Runtime Configuration — Meridian analysis service settings
// =============================================================================
//
// Central configuration for the analysis service. All fields carry
// `#[serde(default)]` so that adding new fields never breaks loading an
// older config file; a missing file falls back to defaults with a warning
// at the call site.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{
    AnalysisParams, DEFAULT_FORECAST_LOOKBACK, DEFAULT_HORIZON_DAYS,
    DEFAULT_MIN_HISTORY_BARS,
};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_data_range() -> String {
    "2y".to_string()
}

fn default_min_history_bars() -> usize {
    DEFAULT_MIN_HISTORY_BARS
}

fn default_forecast_horizon_days() -> usize {
    DEFAULT_HORIZON_DAYS
}

fn default_forecast_lookback() -> usize {
    DEFAULT_FORECAST_LOOKBACK
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration for the Meridian service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Address the REST API binds to. Overridable via `MERIDIAN_BIND_ADDR`.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Lookback range requested from the market-data source (e.g. "2y").
    #[serde(default = "default_data_range")]
    pub data_range: String,

    /// Minimum raw bars required before an analysis is attempted.
    #[serde(default = "default_min_history_bars")]
    pub min_history_bars: usize,

    /// Forecast horizon in trading days.
    #[serde(default = "default_forecast_horizon_days")]
    pub forecast_horizon_days: usize,

    /// Number of recent closes fed to the trend regression.
    #[serde(default = "default_forecast_lookback")]
    pub forecast_lookback: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            data_range: default_data_range(),
            min_history_bars: default_min_history_bars(),
            forecast_horizon_days: default_forecast_horizon_days(),
            forecast_lookback: default_forecast_lookback(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            data_range = %config.data_range,
            min_history_bars = config.min_history_bars,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Project the engine-relevant knobs into [`AnalysisParams`].
    pub fn analysis_params(&self) -> AnalysisParams {
        AnalysisParams {
            horizon_days: self.forecast_horizon_days,
            forecast_lookback: self.forecast_lookback,
            min_history_bars: self.min_history_bars,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.bind_addr, "0.0.0.0:3001");
        assert_eq!(cfg.data_range, "2y");
        assert_eq!(cfg.min_history_bars, 400);
        assert_eq!(cfg.forecast_horizon_days, 20);
        assert_eq!(cfg.forecast_lookback, 30);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.data_range, "2y");
        assert_eq!(cfg.min_history_bars, 400);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "data_range": "5y", "forecast_horizon_days": 10 }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.data_range, "5y");
        assert_eq!(cfg.forecast_horizon_days, 10);
        assert_eq!(cfg.forecast_lookback, 30);
        assert_eq!(cfg.bind_addr, "0.0.0.0:3001");
    }

    #[test]
    fn roundtrip_serialisation() {
        let cfg = RuntimeConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.bind_addr, cfg2.bind_addr);
        assert_eq!(cfg.min_history_bars, cfg2.min_history_bars);
    }

    #[test]
    fn analysis_params_projection() {
        let json = r#"{ "min_history_bars": 250, "forecast_lookback": 40 }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        let params = cfg.analysis_params();
        assert_eq!(params.min_history_bars, 250);
        assert_eq!(params.forecast_lookback, 40);
        assert_eq!(params.horizon_days, 20);
    }
}
