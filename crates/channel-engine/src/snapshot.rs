//! The per-cycle result bundle and the presentation seam.

use channel_core::types::{AlertState, BarSeries, ZoneAlert};
use channel_indicators::IndicatorSet;
use channel_regression::{RegressionResult, TrendDirection};
use chrono::{DateTime, Utc};

/// Everything one polling cycle produced, handed wholesale to the
/// presentation sink. The next cycle replaces it; nothing here is
/// mutated in place.
#[derive(Debug, Clone)]
pub struct CycleSnapshot {
    /// The trailing price window this cycle was computed from
    pub window: BarSeries,
    /// Index-aligned indicator series
    pub indicators: IndicatorSet,
    /// The fitted channel
    pub regression: RegressionResult,
    /// Trend classification with its recommendation
    pub trend: TrendDirection,
    /// The alert fired this cycle, if any
    pub alert: Option<ZoneAlert>,
    /// Display state of the most recent alert (30 s window)
    pub alert_state: AlertState,
    /// When the cycle completed
    pub generated_at: DateTime<Utc>,
}

/// Presentation sink. Receives the full bundle each cycle and owns all
/// rendering; the core exposes no rendering logic itself.
pub trait Presenter: Send + Sync {
    /// Render one completed cycle.
    fn present(&self, snapshot: &CycleSnapshot);

    /// Render a recoverable per-cycle problem (e.g. data source
    /// unavailable) without advancing the displayed state.
    fn present_error(&self, status: &str);
}
