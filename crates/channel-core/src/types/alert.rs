//! Zone alert types and the display-layer alert state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How long a fired alert stays visible, measured from `started_at`.
pub const ALERT_DISPLAY_TIMEOUT_SECS: i64 = 30;

/// Which side of the channel was touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneSide {
    /// The latest low fell into the lower (blue) zone with a rising slope.
    Buy,
    /// The latest high fell into the upper (red) zone with a falling slope.
    Sell,
}

impl fmt::Display for ZoneSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneSide::Buy => write!(f, "BUY"),
            ZoneSide::Sell => write!(f, "SELL"),
        }
    }
}

/// A fired zone alert, produced at most once per cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAlert {
    pub side: ZoneSide,
    /// Pair code the alert refers to
    pub pair: String,
    /// The price that entered the zone (session low for BUY, high for SELL)
    pub price: f64,
    /// Inner boundary of the zone
    pub band_low: f64,
    /// Outer boundary of the zone
    pub band_high: f64,
    /// Current regression slope
    pub slope_now: f64,
    /// Slope five cycles back, the confirmation reference
    pub slope_past: f64,
    /// When the alert fired
    pub fired_at: DateTime<Utc>,
}

impl ZoneAlert {
    /// Format the alert for the notification transport (HTML parse mode).
    pub fn message(&self) -> String {
        let (price_label, zone_label) = match self.side {
            ZoneSide::Buy => ("Low", "BUY zone (blue)"),
            ZoneSide::Sell => ("High", "SELL zone (red)"),
        };
        format!(
            "\u{1F6A8} <b>{}</b> price entered the {}!\n\n\
             {}: {}\nZone: {} to {}\nSlope: {:.8} (5 bars back: {:.8})",
            self.pair,
            zone_label,
            price_label,
            self.price,
            self.band_low,
            self.band_high,
            self.slope_now,
            self.slope_past,
        )
    }
}

/// Display state for the most recent alert.
///
/// The evaluator arms it; expiry is judged at presentation time against a
/// caller-supplied `now`, so the type never reads the wall clock itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertState {
    active: bool,
    started_at: Option<DateTime<Utc>>,
    message: String,
}

impl AlertState {
    /// Arm the state with a fresh alert message.
    pub fn trigger(&mut self, message: String, now: DateTime<Utc>) {
        self.active = true;
        self.started_at = Some(now);
        self.message = message;
    }

    /// Whether the alert is still within its display window at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match (self.active, self.started_at) {
            (true, Some(start)) => {
                now.signed_duration_since(start).num_seconds() < ALERT_DISPLAY_TIMEOUT_SECS
            }
            _ => false,
        }
    }

    /// Clear the state if its display window has elapsed.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        if self.active && !self.is_active(now) {
            self.active = false;
            self.started_at = None;
            self.message.clear();
        }
    }

    /// The current alert message (empty when nothing is armed).
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }
}
