// =============================================================================
// Recommendation Classifier — decision table over the indicator snapshot
// =============================================================================
//
// Turns the latest indicator values plus the forecast diagnostics into one
// discrete trading signal. Two branches, gated on forecast confidence:
//
//   r_squared > 0.4  — trust the extrapolation, key purely on the projected
//                      percentage move:
//                        > 5         STRONG BUY
//                        (2, 5]      BUY
//                        [-2, 2]     HOLD
//                        [-5, -2)    SELL
//                        < -5        STRONG SELL
//
//   r_squared <= 0.4 — ignore the forecast, fall back to trend structure:
//                        close > EMA50 > SMA200   BUY
//                        close < EMA50            SELL
//                        otherwise                HOLD
//
// The fallback SELL rule deliberately consults only the EMA50; a close above
// the EMA50 that fails the triple-bullish stack lands on HOLD. Each result
// records which branch fired so the policy is testable independent of the
// rationale text.
// =============================================================================

use serde::{Deserialize, Serialize};

/// Minimum R² for the forecast to drive the decision directly.
pub const R2_CONFIDENCE_THRESHOLD: f64 = 0.4;

/// Discrete trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongBuy => write!(f, "STRONG BUY"),
            Self::Buy => write!(f, "BUY"),
            Self::Hold => write!(f, "HOLD"),
            Self::Sell => write!(f, "SELL"),
            Self::StrongSell => write!(f, "STRONG SELL"),
        }
    }
}

/// Which half of the decision tree produced the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBranch {
    /// Forecast fit was confident; the projected move drove the signal.
    ForecastConfidence,
    /// Forecast fit was weak; trend structure drove the signal.
    TrendFallback,
}

/// Informational trend descriptor: bullish iff close > EMA50 > SMA200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendBias {
    Bullish,
    Bearish,
}

impl std::fmt::Display for TrendBias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
        }
    }
}

/// Informational MACD descriptor: bullish iff MACD > Signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdCross {
    Bullish,
    Bearish,
}

impl std::fmt::Display for MacdCross {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
        }
    }
}

/// Latest indicator row plus forecast diagnostics, all finite.
///
/// The orchestrator guarantees finiteness by construction (undefined-window
/// rows never reach the classifier); a non-finite field here is a caller bug.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierInputs {
    pub latest_close: f64,
    pub ema_50: f64,
    pub sma_200: f64,
    pub rsi_14: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub price_change_pct: f64,
    pub r_squared: f64,
}

/// One classified decision: the signal, the branch that fired, and a
/// human-readable rationale.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub signal: Signal,
    pub branch: DecisionBranch,
    pub rationale: String,
}

/// Classify the latest market snapshot into a trading recommendation.
///
/// Pure function; the only failure mode is a violated finiteness
/// precondition, which is fatal in debug builds.
pub fn classify(inputs: &ClassifierInputs) -> Recommendation {
    debug_assert!(inputs.latest_close.is_finite(), "latest_close undefined");
    debug_assert!(inputs.ema_50.is_finite(), "ema_50 undefined");
    debug_assert!(inputs.sma_200.is_finite(), "sma_200 undefined");
    debug_assert!(inputs.rsi_14.is_finite(), "rsi_14 undefined");
    debug_assert!(inputs.macd.is_finite(), "macd undefined");
    debug_assert!(inputs.macd_signal.is_finite(), "macd_signal undefined");
    debug_assert!(
        inputs.price_change_pct.is_finite(),
        "price_change_pct undefined"
    );
    debug_assert!(inputs.r_squared.is_finite(), "r_squared undefined");

    if inputs.r_squared > R2_CONFIDENCE_THRESHOLD {
        classify_by_forecast(inputs)
    } else {
        classify_by_trend(inputs)
    }
}

/// Confident branch: the projected percentage move picks the signal.
fn classify_by_forecast(inputs: &ClassifierInputs) -> Recommendation {
    let pct = inputs.price_change_pct;
    let signal = if pct > 5.0 {
        Signal::StrongBuy
    } else if pct > 2.0 {
        Signal::Buy
    } else if pct >= -2.0 {
        Signal::Hold
    } else if pct >= -5.0 {
        Signal::Sell
    } else {
        Signal::StrongSell
    };

    Recommendation {
        signal,
        branch: DecisionBranch::ForecastConfidence,
        rationale: format!(
            "trend fit R² {:.2} is confident; forecast projects a {:+.2}% move",
            inputs.r_squared, pct
        ),
    }
}

/// Low-confidence branch: trend structure picks the signal, forecast ignored.
fn classify_by_trend(inputs: &ClassifierInputs) -> Recommendation {
    let (signal, reason) =
        if inputs.latest_close > inputs.ema_50 && inputs.ema_50 > inputs.sma_200 {
            (
                Signal::Buy,
                "price above both 50-period EMA and 200-period SMA",
            )
        } else if inputs.latest_close < inputs.ema_50 {
            (Signal::Sell, "price below 50-period EMA")
        } else {
            (Signal::Hold, "mixed signals / ranging market")
        };

    Recommendation {
        signal,
        branch: DecisionBranch::TrendFallback,
        rationale: format!(
            "trend fit R² {:.2} is weak; {reason}",
            inputs.r_squared
        ),
    }
}

/// Bullish iff the close sits above the EMA50 which sits above the SMA200.
pub fn trend_bias(latest_close: f64, ema_50: f64, sma_200: f64) -> TrendBias {
    if latest_close > ema_50 && ema_50 > sma_200 {
        TrendBias::Bullish
    } else {
        TrendBias::Bearish
    }
}

/// Bullish iff the MACD line sits above its Signal line.
pub fn macd_cross(macd: f64, macd_signal: f64) -> MacdCross {
    if macd > macd_signal {
        MacdCross::Bullish
    } else {
        MacdCross::Bearish
    }
}
