//! Telegram notification sink.
//!
//! Fire-and-forget: delivery failures surface as `NotifyError` for the
//! caller to log, and empty credentials make the sink report itself as
//! unconfigured so the controller skips it silently.

use async_trait::async_trait;
use channel_core::error::NotifyError;
use channel_core::traits::Notifier;
use tracing::debug;

/// Sends alert messages to a Telegram chat via the Bot API.
pub struct TelegramNotifier {
    client: reqwest::Client,
    bot_token: String,
    chat_id: String,
    api_base: String,
}

impl TelegramNotifier {
    /// Create a notifier; empty token or chat id leaves it unconfigured.
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            bot_token,
            chat_id,
            api_base: "https://api.telegram.org".to_string(),
        }
    }

    /// Override the API base (tests).
    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base;
        self
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let params = [
            ("chat_id", self.chat_id.as_str()),
            ("text", text),
            ("parse_mode", "HTML"),
        ];

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(chat_id = %self.chat_id, "alert delivered");
        Ok(())
    }

    fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
