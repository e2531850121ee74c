//! Moving average indicators.

use channel_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the trailing N values; NaN until the window fills.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = vec![f64::NAN; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        // Sliding window sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result[self.period - 1] = sum / period_f64;

        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result[i] = sum / period_f64;
        }

        result
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Span-based smoothing factor alpha = 2/(span+1), seeded with the first
/// value and carried by the recurrence
/// `ema[i] = alpha * x[i] + (1 - alpha) * ema[i-1]`. No bias correction,
/// so the series is defined from index 0.
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f64,
}

impl Ema {
    /// Create a new EMA with the specified span.
    pub fn new(span: usize) -> Self {
        assert!(span > 0, "Span must be greater than 0");
        let alpha = 2.0 / (span as f64 + 1.0);
        Self { alpha }
    }

    /// The smoothing factor.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = Vec::with_capacity(data.len());
        let Some(&first) = data.first() else {
            return result;
        };

        let mut ema = first;
        result.push(ema);

        let one_minus_alpha = 1.0 - self.alpha;
        for &value in &data[1..] {
            ema = value * self.alpha + ema * one_minus_alpha;
            result.push(ema);
        }

        result
    }

    fn warmup(&self) -> usize {
        // Seeded from the first value, defined from index 0.
        0
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_is_mean_of_trailing_window() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), data.len());
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!((result[2] - 2.0).abs() < 1e-12); // (1+2+3)/3
        assert!((result[3] - 3.0).abs() < 1e-12);
        assert!((result[4] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_sma_insufficient_data_is_all_nan() {
        let sma = Sma::new(5);
        let result = sma.calculate(&[1.0, 2.0, 3.0]);
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_sma20_exact_over_long_series() {
        let sma = Sma::new(20);
        let data: Vec<f64> = (0..40).map(|i| 100.0 + 0.01 * i as f64).collect();
        let result = sma.calculate(&data);

        for i in 19..data.len() {
            let mean: f64 = data[i - 19..=i].iter().sum::<f64>() / 20.0;
            assert!((result[i] - mean).abs() < 1e-9, "mismatch at {}", i);
        }
    }

    #[test]
    fn test_ema_constant_series_stays_constant() {
        let ema = Ema::new(20);
        let result = ema.calculate(&[42.0; 50]);
        assert!(result.iter().all(|&v| (v - 42.0).abs() < 1e-12));
    }

    #[test]
    fn test_ema_step_moves_by_alpha_delta() {
        let ema = Ema::new(20);
        let mut data = vec![100.0; 30];
        data.push(110.0);
        let result = ema.calculate(&data);

        let alpha = ema.alpha();
        let expected = 100.0 + alpha * 10.0;
        assert!((result[30] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_ema_seeded_with_first_value() {
        let ema = Ema::new(20);
        let result = ema.calculate(&[7.5, 8.0]);
        assert!((result[0] - 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_ema_empty_input() {
        let ema = Ema::new(20);
        assert!(ema.calculate(&[]).is_empty());
    }
}
