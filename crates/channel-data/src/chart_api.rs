//! HTTP chart-API bar source.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use channel_core::error::DataError;
use channel_core::traits::BarSource;
use channel_core::types::{Bar, Timeframe};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Chart endpoint configuration.
#[derive(Debug, Clone)]
pub struct ChartApiConfig {
    /// Endpoint base, e.g. "https://tradingpoin.com"
    pub base_url: String,
    /// Upstream source tag forwarded in the query string
    pub source: String,
    /// Upstream instrument label forwarded in the query string
    pub val: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Attempts before giving up on a cycle
    pub max_retries: u32,
    /// Delay between attempts
    pub retry_delay_secs: u64,
}

impl Default for ChartApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://tradingpoin.com".to_string(),
            source: "Binomo".to_string(),
            val: "Z-CRY/IDX".to_string(),
            timeout_secs: 10,
            max_retries: 5,
            retry_delay_secs: 3,
        }
    }
}

/// Wire payload: rows are heterogeneous arrays
/// `[timestamp_ms, open, high, low, close, ...unused]` whose entries may
/// arrive as numbers or numeric strings.
#[derive(Debug, Deserialize)]
struct ChartPayload {
    // Absent and null both mean "no data"
    data: Option<Vec<Vec<Value>>>,
}

/// Live bar source backed by the chart data endpoint.
pub struct ChartApiSource {
    client: reqwest::Client,
    config: ChartApiConfig,
}

impl ChartApiSource {
    /// Create a new source with its own HTTP client.
    pub fn new(config: ChartApiConfig) -> Result<Self, DataError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DataError::Internal(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn request_url(&self, pair: &str, timeframe: Timeframe, load_count: u32) -> String {
        // uid busts the endpoint's response cache
        let uid = Utc::now().timestamp_millis();
        format!(
            "{}/chart/api/data?type=json&token=&pair_code={}&timeframe={}&load_count={}&source={}&val={}&uid={}",
            self.config.base_url,
            pair,
            timeframe.as_secs(),
            load_count,
            self.config.source,
            self.config.val,
            uid,
        )
    }

    async fn fetch_once(&self, url: &str) -> Result<Vec<Bar>, DataError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DataError::Timeout {
                    seconds: self.config.timeout_secs,
                }
            } else {
                DataError::Network(e.to_string())
            }
        })?;

        let response = response
            .error_for_status()
            .map_err(|e| DataError::Network(e.to_string()))?;

        let payload: ChartPayload = response
            .json()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))?;

        parse_rows(&payload.data.unwrap_or_default())
    }
}

#[async_trait]
impl BarSource for ChartApiSource {
    async fn fetch_bars(
        &self,
        pair: &str,
        timeframe: Timeframe,
        load_count: u32,
    ) -> Result<Vec<Bar>, DataError> {
        let retry_delay = Duration::from_secs(self.config.retry_delay_secs);

        for attempt in 1..=self.config.max_retries {
            let url = self.request_url(pair, timeframe, load_count);
            match self.fetch_once(&url).await {
                Ok(bars) => {
                    debug!(pair, %timeframe, bars = bars.len(), "chart fetch ok");
                    return Ok(bars);
                }
                Err(err) => {
                    warn!(pair, attempt, error = %err, "chart fetch failed");
                    if attempt < self.config.max_retries {
                        tokio::time::sleep(retry_delay).await;
                    }
                }
            }
        }

        Err(DataError::RetriesExhausted {
            attempts: self.config.max_retries,
        })
    }

    fn name(&self) -> &str {
        "chart-api"
    }
}

/// Convert raw rows into validated, ascending, deduplicated bars.
///
/// Invalid rows are dropped with a warning; an entirely empty result is a
/// retryable `EmptyPayload`.
fn parse_rows(rows: &[Vec<Value>]) -> Result<Vec<Bar>, DataError> {
    // BTreeMap keyed by timestamp: sorted, and the last duplicate wins
    let mut by_ts: BTreeMap<i64, Bar> = BTreeMap::new();

    for row in rows {
        match parse_row(row) {
            Some(bar) if bar.is_valid() => {
                by_ts.insert(bar.timestamp, bar);
            }
            _ => warn!(?row, "dropping malformed chart row"),
        }
    }

    if by_ts.is_empty() {
        return Err(DataError::EmptyPayload);
    }

    Ok(by_ts.into_values().collect())
}

fn parse_row(row: &[Value]) -> Option<Bar> {
    if row.len() < 5 {
        return None;
    }
    let timestamp = value_to_i64(&row[0])?;
    let open = value_to_f64(&row[1])?;
    let high = value_to_f64(&row[2])?;
    let low = value_to_f64(&row[3])?;
    let close = value_to_f64(&row[4])?;
    Some(Bar::new(timestamp, open, high, low, close))
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
