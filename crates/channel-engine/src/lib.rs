//! The polling cycle controller.
//!
//! Drives the pipeline once per tick: fetch, window, indicators,
//! regression channel, trend, zone alert, then hands the bundle to the
//! presentation sink and (for fired alerts) the notification sink.

mod controller;
mod snapshot;

pub use controller::{PollingController, SettingsOverride};
pub use snapshot::{CycleSnapshot, Presenter};
