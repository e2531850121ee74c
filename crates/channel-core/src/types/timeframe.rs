//! Timeframe definitions for the chart data source.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bar timeframe offered by the chart endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 30 second bars
    #[serde(rename = "30s")]
    #[default]
    Sec30,
    /// 1 minute bars
    #[serde(rename = "1m")]
    Min1,
    /// 5 minute bars
    #[serde(rename = "5m")]
    Min5,
    /// 15 minute bars
    #[serde(rename = "15m")]
    Min15,
}

impl Timeframe {
    /// Get the duration of the timeframe in seconds, the unit the
    /// chart endpoint expects in its query string.
    pub fn as_secs(&self) -> u64 {
        match self {
            Timeframe::Sec30 => 30,
            Timeframe::Min1 => 60,
            Timeframe::Min5 => 300,
            Timeframe::Min15 => 900,
        }
    }

}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::Sec30 => "30s",
            Timeframe::Min1 => "1m",
            Timeframe::Min5 => "5m",
            Timeframe::Min15 => "15m",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The upstream selector labels minute timeframes with bare numbers.
        match s.to_lowercase().as_str() {
            "30s" => Ok(Timeframe::Sec30),
            "1" | "1m" | "1min" => Ok(Timeframe::Min1),
            "5" | "5m" | "5min" => Ok(Timeframe::Min5),
            "15" | "15m" | "15min" => Ok(Timeframe::Min15),
            _ => Err(format!(
                "Invalid timeframe: {} (expected one of 30s, 1m, 5m, 15m)",
                s
            )),
        }
    }
}
