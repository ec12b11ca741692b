// =============================================================================
// Analysis Orchestrator — indicator frame, forecast, recommendation
// =============================================================================
//
// Runs the full pipeline over a single ticker's price history:
//
//   1. Gate on minimum history length
//   2. Compute all indicator series (EMA50, SMA200, RSI14, MACD/Signal)
//   3. Assemble the indicator frame, dropping every row whose trailing
//      window is incomplete — the frame never exposes an undefined field
//   4. Fit the trend forecaster over the most recent closes
//   5. Classify the latest row + forecast into a recommendation
//   6. Emit the consolidated AnalysisReport
//
// The orchestrator performs no I/O and no rendering; it is the seam the API
// layer calls with a series obtained from the market-data client.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::forecast::{forecast_closes, TrendForecast};
use crate::indicators::{calculate_ema, calculate_macd, calculate_rsi, calculate_sma};
use crate::recommendation::{
    classify, macd_cross, trend_bias, ClassifierInputs, MacdCross, Recommendation,
    TrendBias,
};
use crate::types::PriceSeries;

/// Trailing window for the trend EMA.
pub const EMA_WINDOW: usize = 50;
/// Trailing window for the long-term SMA. This is the binding warm-up
/// constraint: the first `SMA_WINDOW - 1` bars never produce a frame row.
pub const SMA_WINDOW: usize = 200;
/// Trailing window for the RSI.
pub const RSI_WINDOW: usize = 14;

/// Default minimum raw history length before any analysis is attempted.
pub const DEFAULT_MIN_HISTORY_BARS: usize = 400;
/// Default forecast horizon in trading days.
pub const DEFAULT_HORIZON_DAYS: usize = 20;
/// Default number of recent closes fed to the regression.
pub const DEFAULT_FORECAST_LOOKBACK: usize = 30;

// =============================================================================
// Errors
// =============================================================================

/// Typed failures produced by the analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The raw series is shorter than the configured minimum, or no bar had
    /// a complete indicator window. Non-retryable; the caller must supply a
    /// longer history.
    #[error("insufficient history: {got} bars available, {need} required")]
    InsufficientHistory { got: usize, need: usize },

    /// Fewer than 2 closes reached the regression. Should be unreachable
    /// once the history gate passed, but defended independently.
    #[error("insufficient data for trend fit: {got} closes available, at least 2 required")]
    InsufficientData { got: usize },
}

// =============================================================================
// Data model
// =============================================================================

/// One bar with a fully populated indicator window. Every field is finite.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub close: f64,
    pub ema_50: f64,
    pub sma_200: f64,
    pub rsi_14: f64,
    pub macd: f64,
    pub macd_signal: f64,
}

/// Tunable knobs for one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisParams {
    pub horizon_days: usize,
    pub forecast_lookback: usize,
    pub min_history_bars: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            forecast_lookback: DEFAULT_FORECAST_LOOKBACK,
            min_history_bars: DEFAULT_MIN_HISTORY_BARS,
        }
    }
}

/// Consolidated output of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// The most recent bar with complete indicators.
    pub last_row: IndicatorRow,
    pub forecast: TrendForecast,
    /// Projected move from the latest close to the last forecasted close.
    pub price_change_pct: f64,
    pub recommendation: Recommendation,
    pub trend_bias: TrendBias,
    pub macd_cross: MacdCross,
}

// =============================================================================
// Pipeline
// =============================================================================

/// Assemble the indicator frame for `series`.
///
/// The four indicator series are computed aligned one-to-one with the bars,
/// then zipped; a row survives only when every indicator is defined and
/// finite. With a complete input of n >= 200 bars the frame holds exactly
/// n - 199 rows (the SMA200 warm-up dominates the RSI's).
pub fn build_indicator_frame(series: &PriceSeries) -> Vec<IndicatorRow> {
    let closes = series.closes();
    if closes.is_empty() {
        return Vec::new();
    }

    let ema_50 = calculate_ema(&closes, EMA_WINDOW);
    let sma_200 = calculate_sma(&closes, SMA_WINDOW);
    let rsi_14 = calculate_rsi(&closes, RSI_WINDOW);
    let (macd, macd_signal) = calculate_macd(&closes);

    let mut frame = Vec::with_capacity(closes.len().saturating_sub(SMA_WINDOW - 1));
    for (i, bar) in series.bars().iter().enumerate() {
        let (Some(sma), Some(rsi)) = (sma_200[i], rsi_14[i]) else {
            continue;
        };
        let row = IndicatorRow {
            date: bar.date,
            close: bar.close,
            ema_50: ema_50[i],
            sma_200: sma,
            rsi_14: rsi,
            macd: macd[i],
            macd_signal: macd_signal[i],
        };
        if row_is_finite(&row) {
            frame.push(row);
        }
    }

    frame
}

fn row_is_finite(row: &IndicatorRow) -> bool {
    row.close.is_finite()
        && row.ema_50.is_finite()
        && row.sma_200.is_finite()
        && row.rsi_14.is_finite()
        && row.macd.is_finite()
        && row.macd_signal.is_finite()
}

/// Run the full analysis pipeline over `series`.
///
/// # Errors
/// - [`AnalysisError::InsufficientHistory`] when the raw series is shorter
///   than `params.min_history_bars`, or when no bar survived the
///   indicator-window filter.
/// - [`AnalysisError::InsufficientData`] when fewer than 2 closes reach the
///   regression (only possible with a degenerate configuration).
pub fn analyze(
    series: &PriceSeries,
    params: &AnalysisParams,
) -> Result<AnalysisReport, AnalysisError> {
    let got = series.len();
    if got < params.min_history_bars {
        return Err(AnalysisError::InsufficientHistory {
            got,
            need: params.min_history_bars,
        });
    }

    let frame = build_indicator_frame(series);
    let Some(last_row) = frame.last().cloned() else {
        return Err(AnalysisError::InsufficientHistory {
            got,
            need: SMA_WINDOW,
        });
    };

    let frame_closes: Vec<f64> = frame.iter().map(|r| r.close).collect();
    let start = frame_closes.len().saturating_sub(params.forecast_lookback);
    let forecast = forecast_closes(&frame_closes[start..], params.horizon_days)?;

    let last_prediction = forecast
        .predictions
        .last()
        .copied()
        .unwrap_or(last_row.close);
    let price_change_pct =
        (last_prediction - last_row.close) / last_row.close * 100.0;

    let recommendation = classify(&ClassifierInputs {
        latest_close: last_row.close,
        ema_50: last_row.ema_50,
        sma_200: last_row.sma_200,
        rsi_14: last_row.rsi_14,
        macd: last_row.macd,
        macd_signal: last_row.macd_signal,
        price_change_pct,
        r_squared: forecast.r_squared,
    });

    let trend_bias = trend_bias(last_row.close, last_row.ema_50, last_row.sma_200);
    let macd_cross = macd_cross(last_row.macd, last_row.macd_signal);

    Ok(AnalysisReport {
        last_row,
        forecast,
        price_change_pct,
        recommendation,
        trend_bias,
        macd_cross,
    })
}
