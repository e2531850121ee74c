//! Trend classification from the fitted channel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the latest regression trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Bullish,
    Bearish,
    Sideways,
}

impl TrendDirection {
    /// Classify by strict comparison of the last two fitted values.
    ///
    /// Returns `None` below two points; the fit's minimum window size
    /// guarantees two in normal operation.
    pub fn classify(predicted: &[f64]) -> Option<TrendDirection> {
        let n = predicted.len();
        if n < 2 {
            return None;
        }
        let (prev, last) = (predicted[n - 2], predicted[n - 1]);
        Some(if last > prev {
            TrendDirection::Bullish
        } else if last < prev {
            TrendDirection::Bearish
        } else {
            TrendDirection::Sideways
        })
    }

    /// The recommendation shown alongside the classification.
    pub fn recommendation(&self) -> &'static str {
        match self {
            TrendDirection::Bullish => "Trend is rising, favor long entries",
            TrendDirection::Bearish => "Trend is falling, favor short entries",
            TrendDirection::Sideways => "No clear trend, stay flat",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Bullish => write!(f, "Bullish"),
            TrendDirection::Bearish => write!(f, "Bearish"),
            TrendDirection::Sideways => write!(f, "Sideways"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_directions() {
        assert_eq!(
            TrendDirection::classify(&[1.0, 2.0]),
            Some(TrendDirection::Bullish)
        );
        assert_eq!(
            TrendDirection::classify(&[2.0, 1.0]),
            Some(TrendDirection::Bearish)
        );
        assert_eq!(
            TrendDirection::classify(&[2.0, 2.0]),
            Some(TrendDirection::Sideways)
        );
    }

    #[test]
    fn test_classify_needs_two_points() {
        assert_eq!(TrendDirection::classify(&[1.0]), None);
        assert_eq!(TrendDirection::classify(&[]), None);
    }

    #[test]
    fn test_only_last_pair_matters() {
        assert_eq!(
            TrendDirection::classify(&[9.0, 5.0, 1.0, 2.0]),
            Some(TrendDirection::Bullish)
        );
    }
}
