//! Watch command implementation.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use channel_config::load_config;
use channel_core::traits::BarSource;
use channel_data::{ChartApiConfig, ChartApiSource, CsvSource};
use channel_engine::{PollingController, SettingsOverride};
use channel_monitor::LogPresenter;
use channel_notify::TelegramNotifier;
use tokio::sync::watch;
use tracing::info;

use crate::cli::WatchArgs;

pub async fn run(args: WatchArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    let overrides = SettingsOverride {
        pair: args.pair,
        timeframe: args
            .timeframe
            .as_deref()
            .map(|s| s.parse().map_err(|e: String| anyhow!(e)))
            .transpose()?,
        refresh_interval_secs: args.refresh,
    };

    let source: Arc<dyn BarSource> = match &args.data {
        Some(path) => Arc::new(CsvSource::new(path.clone())?),
        None => Arc::new(ChartApiSource::new(ChartApiConfig {
            base_url: config.source.base_url.clone(),
            source: config.source.source.clone(),
            val: config.source.val.clone(),
            timeout_secs: config.source.timeout_secs,
            max_retries: config.source.max_retries,
            retry_delay_secs: config.source.retry_delay_secs,
        })?),
    };

    let notifier = Arc::new(TelegramNotifier::new(
        config.telegram.bot_token.clone(),
        config.telegram.chat_id.clone(),
    ));
    let presenter = Arc::new(LogPresenter::new());

    // Ctrl-C flips the stop signal; the controller aborts a pending
    // sleep or fetch wait and finishes the in-flight cycle first.
    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("stop requested");
            let _ = stop_tx.send(true);
        }
    });

    let mut controller = PollingController::new(
        config_path.to_path_buf(),
        config,
        source,
        presenter,
        notifier,
    )
    .with_overrides(overrides);

    controller.run(stop_rx).await;
    Ok(())
}
