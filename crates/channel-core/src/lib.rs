//! Core types and traits for the channel watcher.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries, Timeframe)
//! - Zone alert types and display state
//! - Trait seams for data sources, indicators, and notification sinks
//! - The error taxonomy shared across the workspace

pub mod types;
pub mod traits;
pub mod error;

pub use error::{WatchError, WatchResult};
pub use types::*;
pub use traits::*;
