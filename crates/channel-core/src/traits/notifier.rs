//! Notification sink trait definition.

use crate::error::NotifyError;
use async_trait::async_trait;

/// Fire-and-forget notification sink for alert messages.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one formatted message.
    async fn notify(&self, text: &str) -> Result<(), NotifyError>;

    /// Whether the sink has usable credentials. Unconfigured sinks are
    /// skipped silently rather than treated as an error.
    fn is_configured(&self) -> bool;

    /// Get the sink name.
    fn name(&self) -> &str;
}
