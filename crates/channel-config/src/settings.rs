//! Configuration structures.

use channel_core::types::Timeframe;
use serde::{Deserialize, Serialize};

/// Bounds applied by [`AppConfig::normalize`].
const REFRESH_MIN_SECS: u64 = 5;
const REFRESH_MAX_SECS: u64 = 60;
const DATA_LENGTH_MIN: usize = 30;
const DATA_LENGTH_MAX: usize = 1140;

/// Main application configuration.
///
/// Re-read at every cycle start, so all of it is hot-reconfigurable.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub watch: WatchSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub telegram: TelegramSettings,
}

impl AppConfig {
    /// Clamp values into their supported ranges instead of rejecting.
    pub fn normalize(&mut self) {
        self.watch.refresh_interval_secs = self
            .watch
            .refresh_interval_secs
            .clamp(REFRESH_MIN_SECS, REFRESH_MAX_SECS);
        self.watch.data_length = self
            .watch
            .data_length
            .clamp(DATA_LENGTH_MIN, DATA_LENGTH_MAX);
        self.watch.min_bars = self.watch.min_bars.min(self.watch.data_length).max(2);
        self.watch.max_dev_multiplier = self.watch.max_dev_multiplier.max(1);
        if self.source.max_retries == 0 {
            self.source.max_retries = 1;
        }
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "channelwatch".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Display theme, forwarded to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Watcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchSettings {
    /// Instrument code
    pub pair: String,
    /// Bar timeframe
    pub timeframe: Timeframe,
    /// Seconds between cycles, clamped to 5-60
    pub refresh_interval_secs: u64,
    /// Trailing window length in bars, clamped to 30-1140
    pub data_length: usize,
    /// Below this many fetched bars, refetch with the extended strategy
    pub min_bars: usize,
    /// Tolerance level cap is three times this multiplier
    pub max_dev_multiplier: usize,
    /// Display theme
    pub theme: Theme,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            pair: "CRYIDX.B".to_string(),
            timeframe: Timeframe::Sec30,
            refresh_interval_secs: 10,
            data_length: 1140,
            min_bars: 30,
            max_dev_multiplier: 3,
            theme: Theme::Dark,
        }
    }
}

/// Chart endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    pub base_url: String,
    pub source: String,
    pub val: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_delay_secs: u64,
}

impl Default for SourceSettings {
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

/// Telegram credentials. Empty values mean "skip notification silently".
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
}
