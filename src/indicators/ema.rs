// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   alpha = 2 / (window + 1)
//   EMA_0 = close_0
//   EMA_t = close_t * alpha + EMA_{t-1} * (1 - alpha)
//
// The series is seeded with the first close and is defined for every bar from
// index 0. Early values lean heavily on the seed and are unreliable until
// roughly one window has passed; that is accepted, not corrected. The frame
// assembly in `analysis` is where unusable rows get dropped.
// =============================================================================

/// Compute the EMA series for the given `closes` slice and look-back `window`.
///
/// The output is aligned one-to-one with the input: `result[i]` is the EMA at
/// bar `i`.
///
/// # Edge cases
/// - `window == 0` => empty vec (division by zero guard)
/// - empty `closes` => empty vec
pub fn calculate_ema(closes: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || closes.is_empty() {
        return Vec::new();
    }

    let alpha = 2.0 / (window as f64 + 1.0);

    let mut result = Vec::with_capacity(closes.len());
    let mut prev_ema = closes[0];
    result.push(prev_ema);

    for &close in &closes[1..] {
        let ema = close * alpha + prev_ema * (1.0 - alpha);
        result.push(ema);
        prev_ema = ema;
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: build a simple ascending price series.
    fn ascending(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    // ---- calculate_ema ---------------------------------------------------

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 50).is_empty());
    }

    #[test]
    fn ema_window_zero() {
        assert!(calculate_ema(&[1.0, 2.0, 3.0], 0).is_empty());
    }

    #[test]
    fn ema_single_close_is_the_seed() {
        let ema = calculate_ema(&[42.0], 50);
        assert_eq!(ema, vec![42.0]);
    }

    #[test]
    fn ema_aligned_with_input() {
        let closes = ascending(120);
        let ema = calculate_ema(&closes, 50);
        assert_eq!(ema.len(), closes.len());
    }

    #[test]
    fn ema_known_values() {
        // 5-period EMA of [1..10], seeded with the first close.
        // alpha = 2/6 = 1/3
        let closes = ascending(10);
        let ema = calculate_ema(&closes, 5);
        assert_eq!(ema.len(), 10);

        let alpha = 2.0 / 6.0;
        let mut expected = closes[0];
        assert!((ema[0] - expected).abs() < 1e-12);
        for (i, &c) in closes.iter().enumerate().skip(1) {
            expected = c * alpha + expected * (1.0 - alpha);
            assert!((ema[i] - expected).abs() < 1e-12, "index {i}");
        }
    }

    #[test]
    fn ema_flat_series_stays_flat() {
        let closes = vec![100.0; 60];
        let ema = calculate_ema(&closes, 12);
        for &v in &ema {
            assert!((v - 100.0).abs() < 1e-12);
        }
    }

    #[test]
    fn ema_tracks_rising_prices_from_below() {
        // On a strictly rising series the EMA lags the price but keeps rising.
        let closes = ascending(100);
        let ema = calculate_ema(&closes, 10);
        for i in 1..ema.len() {
            assert!(ema[i] > ema[i - 1]);
            assert!(ema[i] < closes[i]);
        }
    }
}
