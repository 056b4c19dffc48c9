//! Notifier port - outbound user notifications.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from delivering a notification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("notification delivery failed: {message}")]
    Delivery { message: String },
}

impl NotifyError {
    /// Creates a delivery error.
    pub fn delivery(message: impl Into<String>) -> Self {
        NotifyError::Delivery {
            message: message.into(),
        }
    }
}

/// Port for delivering a text message to a user endpoint.
///
/// All sends in the orchestration core are best-effort: failures are logged
/// by the caller and never roll back a committed state transition.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `text` to the user endpoint (phone number).
    async fn send(&self, endpoint: &str, text: &str) -> Result<(), NotifyError>;
}
