//! Error types for the channel watcher.

use thiserror::Error;

/// Top-level watcher error.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Regression error: {0}")]
    Regression(#[from] RegressionError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Data source errors.
///
/// Everything here is transient from the controller's point of view:
/// a failed cycle reports the error and retries, it never kills the loop.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Source returned an empty payload")]
    EmptyPayload,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("Data source unavailable after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Regression fit errors.
#[derive(Error, Debug)]
pub enum RegressionError {
    #[error("Insufficient data: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },
}

/// Notification sink errors. Logged and swallowed, never fatal.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Endpoint rejected message: {status} {body}")]
    Rejected { status: u16, body: String },
}

/// Result type alias for watcher operations.
pub type WatchResult<T> = Result<T, WatchError>;
