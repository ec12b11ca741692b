// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Unweighted trailing mean over the last `window` closes. Unlike the EMA
// there is no meaningful value until a full window has been seen, so the
// first `window - 1` entries are `None`.
//
// Implemented with a rolling sum (add the newest close, subtract the one
// falling out of the window) so the whole series costs O(n) regardless of
// window size.
// =============================================================================

/// Compute the trailing SMA series for the given `closes` and `window`.
///
/// The output is aligned one-to-one with the input: `result[i]` is
/// `Some(mean of closes[i + 1 - window ..= i])` once `i >= window - 1`, and
/// `None` before that.
///
/// # Edge cases
/// - `window == 0` => empty vec (division by zero guard)
/// - `closes.len() < window` => all `None`
pub fn calculate_sma(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(closes.len());
    let mut rolling_sum = 0.0;

    for (i, &close) in closes.iter().enumerate() {
        rolling_sum += close;
        if i >= window {
            rolling_sum -= closes[i - window];
        }
        if i + 1 >= window {
            result.push(Some(rolling_sum / window as f64));
        } else {
            result.push(None);
        }
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    // ---- calculate_sma ---------------------------------------------------

    #[test]
    fn sma_empty_input() {
        assert!(calculate_sma(&[], 200).is_empty());
    }

    #[test]
    fn sma_window_zero() {
        assert!(calculate_sma(&[1.0, 2.0, 3.0], 0).is_empty());
    }

    #[test]
    fn sma_short_series_all_undefined() {
        let sma = calculate_sma(&[1.0, 2.0, 3.0], 5);
        assert_eq!(sma.len(), 3);
        assert!(sma.iter().all(|v| v.is_none()));
    }

    #[test]
    fn sma_warmup_prefix_is_undefined() {
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let sma = calculate_sma(&closes, 4);
        assert_eq!(sma.len(), 10);
        assert!(sma[..3].iter().all(|v| v.is_none()));
        assert!(sma[3..].iter().all(|v| v.is_some()));
    }

    #[test]
    fn sma_known_values() {
        let closes = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let sma = calculate_sma(&closes, 3);
        // windows: [2,4,6] [4,6,8] [6,8,10]
        assert_eq!(sma[2], Some(4.0));
        assert_eq!(sma[3], Some(6.0));
        assert_eq!(sma[4], Some(8.0));
    }

    #[test]
    fn sma_matches_naive_recomputation() {
        // Rolling-sum result must agree with the obvious per-window mean.
        let closes: Vec<f64> = (0..300).map(|i| 100.0 + (i % 7) as f64 * 1.5).collect();
        let window = 200;
        let sma = calculate_sma(&closes, window);
        for i in (window - 1)..closes.len() {
            let naive: f64 =
                closes[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            let got = sma[i].expect("window is complete");
            assert!((got - naive).abs() < 1e-9, "index {i}: {got} vs {naive}");
        }
    }
}
