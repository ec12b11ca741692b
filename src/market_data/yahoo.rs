// =============================================================================
// Yahoo Finance Chart API Client — daily OHLCV history
// =============================================================================
//
// Fetches the daily candle history for a ticker over a lookback range
// (e.g. "2y") from the public chart endpoint:
//
//   GET {base}/v8/finance/chart/{TICKER}?range={range}&interval=1d
//
// The endpoint is unauthenticated but rejects requests without a
// User-Agent. Halted or partially reported days arrive as nulls inside the
// quote arrays; those bars are skipped rather than zero-filled, so a
// missing close can never masquerade as a price. No retry logic — a failed
// fetch surfaces to the caller.
// =============================================================================

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::types::{PriceBar, PriceSeries};

// =============================================================================
// Response shape (only the fields we consume)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client for the Yahoo Finance chart API.
#[derive(Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; meridian/1.0)")
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        Self {
            client,
            base_url: "https://query1.finance.yahoo.com".to_string(),
        }
    }

    /// Override the base URL (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the daily price history for `ticker` over `range`.
    ///
    /// Bars arrive and are returned in ascending date order; bars with any
    /// null field are skipped.
    #[instrument(skip(self), name = "yahoo::fetch_daily_series")]
    pub async fn fetch_daily_series(&self, ticker: &str, range: &str) -> Result<PriceSeries> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d",
            self.base_url, ticker, range
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET chart history for {ticker} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("chart endpoint returned HTTP {status} for {ticker}");
        }

        let body: ChartResponse = resp
            .json()
            .await
            .with_context(|| format!("failed to decode chart response for {ticker}"))?;

        let series = series_from_response(body)
            .with_context(|| format!("chart response for {ticker} unusable"))?;

        debug!(ticker, bars = series.len(), "daily series fetched");
        Ok(series)
    }
}

// =============================================================================
// Response -> PriceSeries
// =============================================================================

/// Convert a decoded chart response into a `PriceSeries`.
///
/// Rows with a null in any OHLCV field are skipped; out-of-order or
/// duplicate timestamps (Yahoo occasionally appends the live quote under
/// the last trading day) are dropped to preserve the strict-ascending
/// invariant.
fn series_from_response(body: ChartResponse) -> Result<PriceSeries> {
    if let Some(err) = body.chart.error {
        bail!("chart API error {}: {}", err.code, err.description);
    }

    let result = body
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .context("chart response carried no result")?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .context("chart response carried no quote data")?;

    let mut bars: Vec<PriceBar> = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let Some(date) = chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
        else {
            continue;
        };
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
            field(&quote.open, i),
            field(&quote.high, i),
            field(&quote.low, i),
            field(&quote.close, i),
            field(&quote.volume, i),
        ) else {
            continue;
        };
        if bars.last().is_some_and(|prev| prev.date >= date) {
            continue;
        }
        bars.push(PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    Ok(PriceSeries::new(bars))
}

fn field(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}
