//! Validate configuration command.

use anyhow::Result;
use channel_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Pair: {}", config.watch.pair);
            println!("Timeframe: {}", config.watch.timeframe);
            println!("Refresh interval: {}s", config.watch.refresh_interval_secs);
            println!("Window length: {} bars", config.watch.data_length);
            println!("Deviation multiplier: {}", config.watch.max_dev_multiplier);
            println!("Theme: {:?}", config.watch.theme);
            println!(
                "Telegram: {}",
                if config.telegram.bot_token.is_empty() || config.telegram.chat_id.is_empty() {
                    "not configured (alerts will be skipped)"
                } else {
                    "configured"
                }
            );
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
