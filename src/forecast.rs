// =============================================================================
// Trend Forecaster — closed-form linear extrapolation
// =============================================================================
//
// Fits an ordinary least-squares line y = slope * x + intercept to the most
// recent window of closes (x = 0, 1, .. n-1), scores the fit with R², and
// extrapolates the line `horizon` steps past the window.
//
// The fit is closed-form over the sums of x, y, xy and x² — no iterative
// solver, no linear-algebra dependency. R² doubles as the forecast-confidence
// proxy consumed by the recommendation classifier: a noisy window produces a
// low (possibly negative) R² and routes the decision through the trend
// fallback instead of trusting the extrapolation.
// =============================================================================

use serde::Serialize;

use crate::analysis::AnalysisError;

/// Result of one regression fit: the extrapolated closes and the
/// goodness-of-fit of the line over its input window.
///
/// `r_squared` is at most 1.0 and may be negative when the line explains the
/// window worse than its mean would.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendForecast {
    pub predictions: Vec<f64>,
    pub r_squared: f64,
}

/// Fit a least-squares line to `closes` and extrapolate `horizon` steps.
///
/// `closes` is the regression window in chronological order; the fit treats
/// it as (x = 0..n-1, y = close) pairs and predicts x = n .. n+horizon-1.
///
/// # Errors
/// Fewer than 2 closes cannot define a line; that fails with
/// [`AnalysisError::InsufficientData`] rather than fitting a degenerate one.
pub fn forecast_closes(
    closes: &[f64],
    horizon: usize,
) -> Result<TrendForecast, AnalysisError> {
    let n = closes.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientData { got: n });
    }

    let n_f = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (i, &y) in closes.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    // x values are distinct, so the denominator is strictly positive.
    let slope = (n_f * sum_xy - sum_x * sum_y) / (n_f * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n_f;

    let mean_y = sum_y / n_f;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (i, &y) in closes.iter().enumerate() {
        let fitted = slope * i as f64 + intercept;
        ss_res += (y - fitted) * (y - fitted);
        ss_tot += (y - mean_y) * (y - mean_y);
    }

    // Zero-variance window: a residual-free fit explains it perfectly, any
    // other fit explains nothing (scikit-learn convention).
    let r_squared = if ss_tot == 0.0 {
        if ss_res < 1e-12 { 1.0 } else { 0.0 }
    } else {
        1.0 - ss_res / ss_tot
    };

    let predictions = (n..n + horizon)
        .map(|x| slope * x as f64 + intercept)
        .collect();

    Ok(TrendForecast {
        predictions,
        r_squared,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    // ---- forecast_closes -------------------------------------------------

    #[test]
    fn forecast_empty_input_fails() {
        let err = forecast_closes(&[], 20).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { got: 0 }));
    }

    #[test]
    fn forecast_single_point_fails() {
        let err = forecast_closes(&[100.0], 20).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { got: 1 }));
    }

    #[test]
    fn forecast_perfect_line_extends_it() {
        // y = 2x + 5 over 30 points: R² = 1, predictions continue the line.
        let closes: Vec<f64> = (0..30).map(|x| 2.0 * x as f64 + 5.0).collect();
        let forecast = forecast_closes(&closes, 20).unwrap();

        assert!((forecast.r_squared - 1.0).abs() < 1e-9);
        assert_eq!(forecast.predictions.len(), 20);
        for (k, &p) in forecast.predictions.iter().enumerate() {
            let expected = 2.0 * (30 + k) as f64 + 5.0;
            assert!((p - expected).abs() < 1e-6, "step {k}: {p} vs {expected}");
        }
    }

    #[test]
    fn forecast_flat_window_predicts_flat() {
        let closes = vec![100.0; 30];
        let forecast = forecast_closes(&closes, 20).unwrap();
        // Zero variance, zero residual => R² = 1 and a flat extrapolation.
        assert!((forecast.r_squared - 1.0).abs() < 1e-12);
        for &p in &forecast.predictions {
            assert!((p - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn forecast_noisy_window_has_low_r_squared() {
        // Alternating closes around a flat mean: the best line is nearly
        // horizontal and explains almost none of the variance.
        let closes: Vec<f64> = (0..30)
            .map(|i| if i % 2 == 0 { 100.0 } else { 110.0 })
            .collect();
        let forecast = forecast_closes(&closes, 20).unwrap();
        assert!(forecast.r_squared < 0.4, "R² {} not low", forecast.r_squared);
        assert!(forecast.r_squared >= 0.0);
    }

    #[test]
    fn forecast_is_idempotent() {
        // Pure function, no hidden state: two runs over the same window are
        // bit-identical.
        let closes: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64).sin() * 3.0 + i as f64 * 0.4)
            .collect();
        let a = forecast_closes(&closes, 20).unwrap();
        let b = forecast_closes(&closes, 20).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn forecast_zero_horizon_fits_without_predictions() {
        let closes: Vec<f64> = (0..30).map(|x| x as f64).collect();
        let forecast = forecast_closes(&closes, 0).unwrap();
        assert!(forecast.predictions.is_empty());
        assert!((forecast.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn forecast_two_points_defines_the_line() {
        let forecast = forecast_closes(&[10.0, 12.0], 3).unwrap();
        // Line through (0,10) and (1,12): slope 2, intercept 10.
        let expected = [14.0, 16.0, 18.0];
        for (p, e) in forecast.predictions.iter().zip(expected.iter()) {
            assert!((p - e).abs() < 1e-9);
        }
        assert!((forecast.r_squared - 1.0).abs() < 1e-12);
    }
}
