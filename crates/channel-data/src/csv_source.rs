//! CSV replay source for offline runs.

use async_trait::async_trait;
use channel_core::error::DataError;
use channel_core::traits::BarSource;
use channel_core::types::{Bar, Timeframe};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close")]
    close: f64,
}

/// Replays bars from a CSV file; pair and load strategy are ignored.
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    /// Create a new CSV source.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DataError> {
        let path = path.into();
        if !path.exists() {
            return Err(DataError::Internal(format!(
                "replay file not found: {}",
                path.display()
            )));
        }
        Ok(Self { path })
    }

    fn load(&self, path: &Path) -> Result<Vec<Bar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| DataError::Parse(e.to_string()))?;

        let mut bars = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::Parse(e.to_string()))?;
            let timestamp = parse_timestamp(&record.date)?;
            let bar = Bar::new(timestamp, record.open, record.high, record.low, record.close);
            if bar.is_valid() {
                bars.push(bar);
            } else {
                warn!(date = %record.date, "dropping invalid replay row");
            }
        }

        if bars.is_empty() {
            return Err(DataError::EmptyPayload);
        }

        bars.sort_by_key(|b| b.timestamp);
        Ok(bars)
    }
}

#[async_trait]
impl BarSource for CsvSource {
    async fn fetch_bars(
        &self,
        _pair: &str,
        _timeframe: Timeframe,
        _load_count: u32,
    ) -> Result<Vec<Bar>, DataError> {
        self.load(&self.path)
    }

    fn name(&self) -> &str {
        "csv-replay"
    }
}

/// Parse various timestamp formats.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d",
        "%Y/%m/%d",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    // Unix timestamp, milliseconds if more than 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::Parse(format!(
        "Could not parse date: {}",
        date_str
    )))
}
