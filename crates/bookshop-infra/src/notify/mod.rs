//! Notification delivery implementations.

use async_trait::async_trait;

use bookshop_core::ports::{NotifyError, Notifier};

/// Writes notifications to the log instead of sending them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, recipient: &str, content: &str) -> Result<(), NotifyError> {
        tracing::info!(recipient = %recipient, content = %content, "Notification");
        Ok(())
    }
}

/// Drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopNotifier;

#[async_trait]
impl Notifier for NopNotifier {
    async fn notify(&self, _recipient: &str, _content: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}
