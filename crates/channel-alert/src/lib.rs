//! Zone alert evaluation.
//!
//! Maintains the short cross-cycle history of regression slopes and
//! decides whether the latest bar triggers a BUY/SELL zone alert, with
//! slope-direction confirmation. Rendering and delivery of a fired alert
//! belong to the presentation and notification sinks, not to this crate.

mod evaluator;
mod slope_history;

pub use evaluator::ZoneEvaluator;
pub use slope_history::{SlopeHistory, SLOPE_HISTORY_CAPACITY};
