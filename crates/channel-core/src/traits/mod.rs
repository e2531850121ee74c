//! Trait seams for the channel watcher.

mod bar_source;
mod indicator;
mod notifier;

pub use bar_source::BarSource;
pub use indicator::{Indicator, MultiOutputIndicator};
pub use notifier::Notifier;
