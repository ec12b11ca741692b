// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD   = EMA(12) - EMA(26) of the closes
// Signal = EMA(9) of the MACD series itself
//
// Both series inherit the EMA's from-index-0 alignment, so they line up
// one-to-one with the input closes. A MACD cross (MACD rising above or
// falling below its Signal line) is the classic momentum-shift trigger.
// =============================================================================

use super::ema::calculate_ema;

/// Fast EMA window for the MACD line.
pub const MACD_FAST: usize = 12;
/// Slow EMA window for the MACD line.
pub const MACD_SLOW: usize = 26;
/// EMA window for the Signal line.
pub const MACD_SIGNAL: usize = 9;

/// Compute the MACD and Signal series for the given `closes`.
///
/// Returns `(macd, signal)`, both aligned one-to-one with the input.
/// Empty input yields two empty vectors.
pub fn calculate_macd(closes: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let ema_fast = calculate_ema(closes, MACD_FAST);
    let ema_slow = calculate_ema(closes, MACD_SLOW);

    let macd: Vec<f64> = ema_fast
        .iter()
        .zip(ema_slow.iter())
        .map(|(fast, slow)| fast - slow)
        .collect();

    let signal = calculate_ema(&macd, MACD_SIGNAL);

    (macd, signal)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    // ---- calculate_macd --------------------------------------------------

    #[test]
    fn macd_empty_input() {
        let (macd, signal) = calculate_macd(&[]);
        assert!(macd.is_empty());
        assert!(signal.is_empty());
    }

    #[test]
    fn macd_aligned_with_input() {
        let closes: Vec<f64> = (0..80).map(|i| 50.0 + (i % 9) as f64).collect();
        let (macd, signal) = calculate_macd(&closes);
        assert_eq!(macd.len(), closes.len());
        assert_eq!(signal.len(), closes.len());
    }

    #[test]
    fn macd_flat_series_is_zero() {
        let closes = vec![100.0; 120];
        let (macd, signal) = calculate_macd(&closes);
        for &v in &macd {
            assert!(v.abs() < 1e-12, "MACD {v} on flat series");
        }
        for &v in &signal {
            assert!(v.abs() < 1e-12, "Signal {v} on flat series");
        }
    }

    #[test]
    fn macd_positive_in_sustained_uptrend() {
        // In a long rising series the fast EMA sits above the slow EMA.
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + i as f64).collect();
        let (macd, _) = calculate_macd(&closes);
        assert!(*macd.last().unwrap() > 0.0);
    }

    #[test]
    fn macd_signal_is_ema9_of_macd() {
        // Recompute both sequences independently and compare element-wise
        // within floating-point tolerance.
        let closes: Vec<f64> = (0..150)
            .map(|i| 100.0 + (i as f64 * 0.3) + ((i * 7) % 5) as f64)
            .collect();
        let (macd, signal) = calculate_macd(&closes);

        let ema12 = calculate_ema(&closes, 12);
        let ema26 = calculate_ema(&closes, 26);
        let macd_expected: Vec<f64> =
            ema12.iter().zip(ema26.iter()).map(|(a, b)| a - b).collect();
        let signal_expected = calculate_ema(&macd_expected, 9);

        assert_eq!(macd.len(), macd_expected.len());
        for (a, b) in macd.iter().zip(macd_expected.iter()) {
            let tol = 1e-9 * b.abs().max(1.0);
            assert!((a - b).abs() <= tol, "MACD {a} vs {b}");
        }
        for (a, b) in signal.iter().zip(signal_expected.iter()) {
            let tol = 1e-9 * b.abs().max(1.0);
            assert!((a - b).abs() <= tol, "Signal {a} vs {b}");
        }
    }
}
