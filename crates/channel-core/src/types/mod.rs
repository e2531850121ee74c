//! Core data types for the channel watcher.

mod alert;
mod ohlcv;
mod timeframe;

pub use alert::{AlertState, ZoneAlert, ZoneSide, ALERT_DISPLAY_TIMEOUT_SECS};
pub use ohlcv::{Bar, BarSeries};
pub use timeframe::Timeframe;
