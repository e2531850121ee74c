//! Momentum indicators.

use channel_core::traits::{Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

use crate::moving_average::Ema;

/// Relative Strength Index (RSI).
///
/// Simple rolling means of gains and losses over the trailing period,
/// `RSI = 100 - 100 / (1 + avg_gain / avg_loss)`. NaN for the first
/// `period` indices (no delta exists at index 0).
///
/// When the average loss is zero the ratio is unbounded; the value is
/// clamped to 100.0 instead of producing inf or NaN.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = vec![f64::NAN; data.len()];
        if data.len() <= self.period {
            return result;
        }

        // Signed deltas split into clamped gain/loss series
        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for i in 1..data.len() {
            let change = data[i] - data[i - 1];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let period_f64 = self.period as f64;
        let mut gain_sum: f64 = gains[..self.period].iter().sum();
        let mut loss_sum: f64 = losses[..self.period].iter().sum();

        // First defined value sits at bar index `period` (delta index period-1)
        for i in self.period..data.len() {
            if i > self.period {
                gain_sum = gain_sum - gains[i - self.period - 1] + gains[i - 1];
                loss_sum = loss_sum - losses[i - self.period - 1] + losses[i - 1];
            }

            let avg_gain = gain_sum / period_f64;
            let avg_loss = loss_sum / period_f64;

            result[i] = if avg_loss == 0.0 {
                100.0
            } else {
                100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
            };
        }

        result
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD output for one bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// Difference of two first-value-seeded EMAs with an EMA signal line.
/// Both component EMAs are defined from index 0, so the output is aligned
/// with the input over its full length.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    /// Create a new MACD with default spans (12, 26, 9).
    pub fn new() -> Self {
        Self::with_spans(12, 26, 9)
    }

    /// Create a MACD with custom spans.
    pub fn with_spans(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast span must be less than slow span");
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        let fast_ema = self.fast.calculate(data);
        let slow_ema = self.slow.calculate(data);

        let macd_line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        let signal_line = self.signal.calculate(&macd_line);

        macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(&macd, &signal)| MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect()
    }

    fn warmup(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_warmup_is_nan() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..30).map(|i| 100.0 + (i % 3) as f64).collect();
        let result = rsi.calculate(&data);

        assert_eq!(result.len(), data.len());
        assert!(result[..14].iter().all(|v| v.is_nan()));
        assert!(result[14..].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_rsi_all_gains_clamps_to_100() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let result = rsi.calculate(&data);

        assert!((result[19] - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_rsi_all_losses_is_zero() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let result = rsi.calculate(&data);

        assert!(result[19].abs() < 1e-12);
    }

    #[test]
    fn test_rsi_rolling_window_matches_direct_mean() {
        let rsi = Rsi::new(3);
        let data = vec![10.0, 11.0, 10.5, 10.5, 12.0, 11.0];
        let result = rsi.calculate(&data);

        // At index 4: deltas in window are [-0.5, 0.0, +1.5]
        let avg_gain = 1.5 / 3.0;
        let avg_loss = 0.5 / 3.0;
        let expected = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
        assert!((result[4] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_macd_constant_series_is_zero() {
        let macd = Macd::new();
        let result = macd.calculate(&[50.0; 40]);

        assert_eq!(result.len(), 40);
        for out in result {
            assert!(out.macd.abs() < 1e-12);
            assert!(out.signal.abs() < 1e-12);
            assert!(out.histogram.abs() < 1e-12);
        }
    }

    #[test]
    fn test_macd_matches_component_emas() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();

        let fast = Ema::new(12).calculate(&data);
        let slow = Ema::new(26).calculate(&data);
        let result = macd.calculate(&data);

        for i in 0..data.len() {
            assert!((result[i].macd - (fast[i] - slow[i])).abs() < 1e-12);
        }
    }
}
