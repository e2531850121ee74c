//! Logging setup and the log-based presentation sink.

mod logging;
mod presenter;

pub use logging::setup_logging;
pub use presenter::LogPresenter;
