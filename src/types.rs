// =============================================================================
// Shared types used across the Meridian analysis engine
// =============================================================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data. Immutable once produced by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Chronologically ordered daily price history for a single ticker.
///
/// Invariants (owned by the data source, asserted in debug builds):
/// - bars ascend strictly by date (no duplicates)
/// - trading-day gaps are acceptable; calendar gaps are never filled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Wrap a chronologically ordered set of bars.
    pub fn new(bars: Vec<PriceBar>) -> Self {
        debug_assert!(
            bars.windows(2).all(|w| w[0].date < w[1].date),
            "price series must ascend strictly by date"
        );
        Self { bars }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Project the closes into a plain slice-friendly vector for the
    /// indicator calculators.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000.0,
        }
    }

    #[test]
    fn series_accessors() {
        let series = PriceSeries::new(vec![bar(1, 10.0), bar(2, 11.0), bar(3, 12.0)]);
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
        assert_eq!(series.last().unwrap().close, 12.0);
    }

    #[test]
    fn empty_series() {
        let series = PriceSeries::new(Vec::new());
        assert!(series.is_empty());
        assert!(series.last().is_none());
        assert!(series.closes().is_empty());
    }
}
