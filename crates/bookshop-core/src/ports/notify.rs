use async_trait::async_trait;

/// Outbound notification delivery (email, console).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient: &str, content: &str) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}
