//! Bar data sources.
//!
//! `ChartApiSource` talks to the live chart endpoint with bounded
//! retries; `CsvSource` replays a file for offline runs and tests.

mod chart_api;
mod csv_source;

pub use chart_api::{ChartApiConfig, ChartApiSource};
pub use csv_source::CsvSource;
