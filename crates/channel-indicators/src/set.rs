//! The combined per-cycle indicator set.

use channel_core::traits::{Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

use crate::{Ema, Macd, Rsi, Sma};

/// Per-bar derived series, each the same length as the price window.
///
/// Warm-up entries are NaN; callers must tolerate missing leading values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub sma20: Vec<f64>,
    pub ema20: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub rsi: Vec<f64>,
}

impl IndicatorSet {
    /// Compute the full set from the window's close prices.
    pub fn compute(closes: &[f64]) -> Self {
        let sma20 = Sma::new(20).calculate(closes);
        let ema20 = Ema::new(20).calculate(closes);
        let rsi = Rsi::new(14).calculate(closes);

        let macd_out = Macd::new().calculate(closes);
        let macd = macd_out.iter().map(|o| o.macd).collect();
        let signal_line = macd_out.iter().map(|o| o.signal).collect();

        Self {
            sma20,
            ema20,
            macd,
            signal_line,
            rsi,
        }
    }

    /// Number of bars the set covers.
    pub fn len(&self) -> usize {
        self.sma20.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma20.is_empty()
    }
}
