// =============================================================================
// Relative Strength Index (RSI) — trailing simple averages
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute price deltas from consecutive closes.
// Step 2 — Split into gains (positive deltas) and losses (magnitudes of
//          negative deltas), zero otherwise.
// Step 3 — Take the trailing `window`-bar simple average of each, maintained
//          as rolling sums.
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// When the average loss over the window is exactly zero the ratio is
// infinite and the formula saturates; we pin that case to 100.0 explicitly
// instead of letting f64 infinity flow through the division. This covers
// both the all-gains window and the perfectly flat one.
//
// Thresholds:  RSI > 70 => overbought,  RSI < 30 => oversold.
// =============================================================================

/// Compute the RSI series for the given `closes` and `window`.
///
/// The output is aligned one-to-one with the input: `result[i]` is the RSI at
/// bar `i`, or `None` while fewer than `window` deltas are available (the
/// first `window` entries, since bar 0 has no delta at all).
///
/// # Edge cases
/// - `window == 0` => empty vec
/// - `avg_loss == 0` over a complete window => RSI saturates at exactly 100.0
pub fn calculate_rsi(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return result;
    }

    // Bar 0 has no preceding close, hence no delta.
    result.push(None);

    // Rolling sums of gains and losses over the trailing `window` deltas.
    // gains[k] / losses[k] correspond to the delta ending at bar k + 1.
    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;

    for i in 1..closes.len() {
        let delta = closes[i] - closes[i - 1];
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { delta.abs() } else { 0.0 };
        gains.push(gain);
        losses.push(loss);
        gain_sum += gain;
        loss_sum += loss;

        let deltas_seen = i; // deltas available up to and including bar i
        if deltas_seen > window {
            gain_sum -= gains[deltas_seen - window - 1];
            loss_sum -= losses[deltas_seen - window - 1];
        }

        if deltas_seen >= window {
            let avg_gain = gain_sum / window as f64;
            let avg_loss = loss_sum / window as f64;
            result.push(Some(rsi_from_averages(avg_gain, avg_loss)));
        } else {
            result.push(None);
        }
    }

    result
}

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// `avg_loss == 0` saturates to exactly 100.0 (the limit of the formula as
/// RS grows without bound).
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
