//! Per-cycle zone alert decision.

use channel_core::types::{Bar, ZoneAlert, ZoneSide};
use channel_regression::RegressionResult;
use chrono::{DateTime, Utc};

use crate::SlopeHistory;

/// How many slopes back the confirmation reference sits (inclusive of the
/// current one): the newest slope is compared against the one five
/// cycles earlier.
const CONFIRMATION_SPAN: usize = 6;

/// Decides whether the latest bar triggers a zone alert.
///
/// Owns the slope history; everything else is taken fresh each cycle.
/// At most one alert fires per cycle, BUY evaluated before SELL (the two
/// are mutually exclusive anyway: one needs a rising slope, the other a
/// falling one).
#[derive(Debug, Default)]
pub struct ZoneEvaluator {
    history: SlopeHistory,
}

impl ZoneEvaluator {
    pub fn new() -> Self {
        Self {
            history: SlopeHistory::new(),
        }
    }

    /// Record this cycle's slope and evaluate the latest bar.
    ///
    /// Suppressed (returns `None`, not an error) until six slopes have
    /// accumulated or while the channel has fewer than two levels.
    pub fn evaluate(
        &mut self,
        pair: &str,
        bar: &Bar,
        regression: &RegressionResult,
        now: DateTime<Utc>,
    ) -> Option<ZoneAlert> {
        self.history.push(regression.slope);

        let (slope_now, slope_past) = self.history.confirmation_pair(CONFIRMATION_SPAN)?;

        if slope_now > slope_past {
            let (lo, hi) = regression.lower_zone()?;
            if bar.low >= lo && bar.low <= hi {
                return Some(ZoneAlert {
                    side: ZoneSide::Buy,
                    pair: pair.to_string(),
                    price: bar.low,
                    band_low: lo,
                    band_high: hi,
                    slope_now,
                    slope_past,
                    fired_at: now,
                });
            }
        } else if slope_now < slope_past {
            let (lo, hi) = regression.upper_zone()?;
            if bar.high >= lo && bar.high <= hi {
                return Some(ZoneAlert {
                    side: ZoneSide::Sell,
                    pair: pair.to_string(),
                    price: bar.high,
                    band_low: lo,
                    band_high: hi,
                    slope_now,
                    slope_past,
                    fired_at: now,
                });
            }
        }

        None
    }

    /// Number of slopes currently retained.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
