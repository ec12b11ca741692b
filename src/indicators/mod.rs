// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the technical indicators used by
// the analysis engine. Every series is aligned one-to-one with the input
// closes; indicators that need a complete trailing window before they are
// meaningful report the warm-up prefix as `None`, so callers are forced to
// handle insufficient-data rows instead of reading garbage.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
