//! Data source trait definition.

use crate::error::DataError;
use crate::types::{Bar, Timeframe};
use async_trait::async_trait;

/// Trait for bar data sources.
///
/// Implementations own their retry policy: a returned error means the
/// source's bounded retries are already exhausted for this request.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Fetch the bar series for one pair.
    ///
    /// # Arguments
    /// * `pair` - Pair code, e.g. "CRYIDX.B"
    /// * `timeframe` - Bar timeframe
    /// * `load_count` - Source-specific load strategy selector; 0 is the
    ///   default page, 1 requests the extended history page
    ///
    /// # Returns
    /// Bars ordered ascending by timestamp, deduplicated, validated.
    async fn fetch_bars(
        &self,
        pair: &str,
        timeframe: Timeframe,
        load_count: u32,
    ) -> Result<Vec<Bar>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
