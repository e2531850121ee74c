//! Log-based presentation sink.

use channel_engine::{CycleSnapshot, Presenter};
use chrono::Utc;
use tracing::{error, info, warn};

/// Renders each cycle through tracing. The terminal log line replaces
/// the chart a graphical frontend would draw.
#[derive(Debug, Default)]
pub struct LogPresenter;

impl LogPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for LogPresenter {
    fn present(&self, snapshot: &CycleSnapshot) {
        let close = snapshot.window.last().map(|b| b.close).unwrap_or(f64::NAN);

        info!(
            pair = %snapshot.window.pair,
            timeframe = %snapshot.window.timeframe,
            bars = snapshot.window.len(),
            close = %fmt_value(close),
            sma20 = %fmt_value(last_of(&snapshot.indicators.sma20)),
            ema20 = %fmt_value(last_of(&snapshot.indicators.ema20)),
            macd = %fmt_value(last_of(&snapshot.indicators.macd)),
            rsi = %fmt_value(last_of(&snapshot.indicators.rsi)),
            slope = snapshot.regression.slope,
            levels = snapshot.regression.level_count(),
            trend = %snapshot.trend,
            advice = snapshot.trend.recommendation(),
            "cycle"
        );

        // The alert banner stays up while the display window is open
        if snapshot.alert_state.is_active(Utc::now()) {
            warn!(message = snapshot.alert_state.message(), "ALERT");
        }
    }

    fn present_error(&self, status: &str) {
        error!(status, "cycle failed");
    }
}

fn last_of(series: &[f64]) -> f64 {
    series.last().copied().unwrap_or(f64::NAN)
}

fn fmt_value(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.6}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_value_handles_warmup_nan() {
        assert_eq!(fmt_value(f64::NAN), "-");
        assert_eq!(fmt_value(1.25), "1.250000");
    }

    #[test]
    fn test_last_of_empty_series() {
        assert!(last_of(&[]).is_nan());
        assert_eq!(last_of(&[1.0, 2.0]), 2.0);
    }
}
