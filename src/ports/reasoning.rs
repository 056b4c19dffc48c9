//! Reasoning port - the natural-language collaborator.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the reasoning collaborator.
///
/// Any transport or model failure surfaces here; callers must catch and
/// degrade gracefully rather than crash a turn.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReasoningError {
    #[error("reasoning provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("reasoning request timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl ReasoningError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        ReasoningError::Unavailable {
            message: message.into(),
        }
    }
}

/// Port for prompt-in, text-out reasoning calls.
#[async_trait]
pub trait Reasoning: Send + Sync {
    /// Sends a prompt and returns the model's free-text reply.
    async fn chat(&self, prompt: &str) -> Result<String, ReasoningError>;
}
