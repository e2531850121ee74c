//! Ordinary least-squares channel fit with tolerance bands.

use channel_core::error::RegressionError;
use serde::{Deserialize, Serialize};

/// Result of one channel fit over the current price window.
///
/// Fully recomputed each cycle; all series are aligned with the window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Fitted trend line, one value per bar
    pub predicted: Vec<f64>,
    /// Price change per second
    pub slope: f64,
    /// Trend line value at t = 0
    pub intercept: f64,
    /// Population standard deviation of the residuals
    pub std_dev: f64,
    /// Tolerance offsets, strictly increasing multiples of `std_dev`
    pub levels: Vec<f64>,
    /// `predicted + levels[k]` elementwise, innermost first
    pub upper_bands: Vec<Vec<f64>>,
    /// `predicted - levels[k]` elementwise, innermost first
    pub lower_bands: Vec<Vec<f64>>,
}

impl RegressionResult {
    /// Number of tolerance levels on each side.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// The lower zone at the latest bar: the interval spanned by the last
    /// values of the two outermost lower bands, ordered low to high.
    /// `None` when fewer than two levels exist.
    pub fn lower_zone(&self) -> Option<(f64, f64)> {
        Self::zone_of(&self.lower_bands)
    }

    /// The upper zone at the latest bar, ordered low to high.
    pub fn upper_zone(&self) -> Option<(f64, f64)> {
        Self::zone_of(&self.upper_bands)
    }

    fn zone_of(bands: &[Vec<f64>]) -> Option<(f64, f64)> {
        let n = bands.len();
        if n < 2 {
            return None;
        }
        let a = *bands[n - 2].last()?;
        let b = *bands[n - 1].last()?;
        Some((a.min(b), a.max(b)))
    }
}

/// OLS channel fit of close price against timestamp (seconds).
#[derive(Debug, Clone)]
pub struct RegressionChannel {
    max_dev_multiplier: usize,
}

impl RegressionChannel {
    /// Create a channel fit with the given deviation multiplier.
    ///
    /// The level count is capped at `max_dev_multiplier * 3`.
    pub fn new(max_dev_multiplier: usize) -> Self {
        assert!(max_dev_multiplier > 0, "Multiplier must be greater than 0");
        Self { max_dev_multiplier }
    }

    /// Fit the window. `times` is the bar time axis in seconds, `closes`
    /// the matching close prices.
    pub fn fit(&self, times: &[f64], closes: &[f64]) -> Result<RegressionResult, RegressionError> {
        let n = times.len().min(closes.len());
        if n < 2 {
            return Err(RegressionError::InsufficientData {
                required: 2,
                available: n,
            });
        }
        let times = &times[..n];
        let closes = &closes[..n];
        let n_f64 = n as f64;

        let t_mean = times.iter().sum::<f64>() / n_f64;
        let c_mean = closes.iter().sum::<f64>() / n_f64;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&t, &c) in times.iter().zip(closes.iter()) {
            let dt = t - t_mean;
            sxx += dt * dt;
            sxy += dt * (c - c_mean);
        }

        // A zero-variance time axis degrades to a flat fit
        let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
        let intercept = c_mean - slope * t_mean;

        let predicted: Vec<f64> = times.iter().map(|&t| slope * t + intercept).collect();

        let mut sq_sum = 0.0;
        let mut max_abs = 0.0f64;
        for (&c, &p) in closes.iter().zip(predicted.iter()) {
            let r = c - p;
            sq_sum += r * r;
            max_abs = max_abs.max(r.abs());
        }
        let std_dev = (sq_sum / n_f64).sqrt();

        let level_count = self.level_count(std_dev, max_abs);
        let levels: Vec<f64> = (0..level_count)
            .map(|k| std_dev * (k + 1) as f64)
            .collect();

        let upper_bands: Vec<Vec<f64>> = levels
            .iter()
            .map(|&tol| predicted.iter().map(|&p| p + tol).collect())
            .collect();
        let lower_bands: Vec<Vec<f64>> = levels
            .iter()
            .map(|&tol| predicted.iter().map(|&p| p - tol).collect())
            .collect();

        Ok(RegressionResult {
            predicted,
            slope,
            intercept,
            std_dev,
            levels,
            upper_bands,
            lower_bands,
        })
    }

    /// `ceil(max_abs / std_dev)` clamped into `1..=multiplier * 3`.
    ///
    /// A near-zero residual deviation (perfectly linear window) skips the
    /// ratio entirely and falls back to a single level.
    fn level_count(&self, std_dev: f64, max_abs: f64) -> usize {
        let cap = self.max_dev_multiplier * 3;
        if !std_dev.is_normal() {
            return 1;
        }
        let optimal = (max_abs / std_dev).ceil() as usize;
        optimal.clamp(1, cap)
    }
}

impl Default for RegressionChannel {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(n: usize) -> Vec<f64> {
        (0..n).map(|i| (i * 30) as f64).collect()
    }

    #[test]
    fn test_perfect_linear_series_recovers_slope() {
        let times = axis(50);
        let closes: Vec<f64> = times.iter().map(|&t| 100.0 + 0.5 * t).collect();

        let result = RegressionChannel::default().fit(&times, &closes).unwrap();

        assert!((result.slope - 0.5).abs() < 1e-9);
        assert!((result.intercept - 100.0).abs() < 1e-6);
        assert!(result.std_dev < 1e-9);
        // Degenerate residual variance falls back to a single level
        assert_eq!(result.level_count(), 1);
    }

    #[test]
    fn test_insufficient_window_is_rejected() {
        let err = RegressionChannel::default()
            .fit(&[30.0], &[100.0])
            .unwrap_err();
        match err {
            RegressionError::InsufficientData {
                required,
                available,
            } => {
                assert_eq!(required, 2);
                assert_eq!(available, 1);
            }
        }
    }

    #[test]
    fn test_band_monotonicity() {
        let times = axis(60);
        let closes: Vec<f64> = times
            .iter()
            .enumerate()
            .map(|(i, &t)| 100.0 + 0.01 * t + ((i % 7) as f64 - 3.0))
            .collect();

        let result = RegressionChannel::default().fit(&times, &closes).unwrap();
        assert!(result.level_count() >= 2);

        for k in 0..result.level_count() - 1 {
            for i in 0..times.len() {
                assert!(result.upper_bands[k][i] < result.upper_bands[k + 1][i]);
                assert!(result.lower_bands[k][i] > result.lower_bands[k + 1][i]);
            }
        }
        // Levels strictly increasing
        for k in 1..result.level_count() {
            assert!(result.levels[k] > result.levels[k - 1]);
        }
    }

    #[test]
    fn test_level_count_capped_at_nine() {
        let times = axis(40);
        // One extreme outlier forces a large max-residual/std ratio
        let mut closes: Vec<f64> = times.iter().map(|&t| 100.0 + 0.001 * t).collect();
        closes[20] += 500.0;

        let result = RegressionChannel::default().fit(&times, &closes).unwrap();
        assert!(result.level_count() <= 9);
        assert!(result.level_count() >= 1);
    }

    #[test]
    fn test_zero_variance_time_axis_is_flat() {
        let times = vec![30.0; 5];
        let closes = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        let result = RegressionChannel::default().fit(&times, &closes).unwrap();
        assert_eq!(result.slope, 0.0);
        assert!((result.intercept - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zone_helpers() {
        let times = axis(30);
        let closes: Vec<f64> = times
            .iter()
            .enumerate()
            .map(|(i, &t)| 100.0 + 0.01 * t + (i % 5) as f64 - 2.0)
            .collect();

        let result = RegressionChannel::default().fit(&times, &closes).unwrap();
        assert!(result.level_count() >= 2);

        let (lo, hi) = result.lower_zone().unwrap();
        assert!(lo < hi);
        let (lo, hi) = result.upper_zone().unwrap();
        assert!(lo < hi);
    }

    #[test]
    fn test_single_level_has_no_zone() {
        let times = axis(20);
        let closes: Vec<f64> = times.iter().map(|&t| 100.0 + 0.5 * t).collect();

        let result = RegressionChannel::default().fit(&times, &closes).unwrap();
        assert_eq!(result.level_count(), 1);
        assert!(result.lower_zone().is_none());
        assert!(result.upper_zone().is_none());
    }
}
