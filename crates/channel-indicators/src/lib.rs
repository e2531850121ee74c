//! Technical indicators for the channel watcher.
//!
//! This crate provides the per-cycle indicator set:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (MACD with signal line, RSI)
//!
//! All series are index-aligned with the input window; warm-up entries
//! are `f64::NAN` and callers must tolerate missing leading values.

pub mod momentum;
pub mod moving_average;
mod set;

pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use set::IndicatorSet;
