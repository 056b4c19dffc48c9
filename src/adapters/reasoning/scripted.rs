//! Scripted reasoning collaborator.
//!
//! Returns pre-configured replies in order and records every prompt, so
//! tests and the demo binary can run without a model behind them.
//!
//! # Example
//!
//! ```ignore
//! let reasoning = ScriptedReasoning::new()
//!     .with_reply(r#"{"originCode": "JFK"}"#)
//!     .with_error(ReasoningError::unavailable("model down"));
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{Reasoning, ReasoningError};

/// Queue-scripted implementation of the `Reasoning` port.
///
/// An exhausted script returns `ReasoningError::Unavailable`, which is the
/// same degradation path a real provider outage takes.
#[derive(Debug, Clone, Default)]
pub struct ScriptedReasoning {
    replies: Arc<Mutex<VecDeque<Result<String, ReasoningError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedReasoning {
    /// Creates a reasoning stub with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: ReasoningError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns every prompt received so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Reasoning for ScriptedReasoning {
    async fn chat(&self, prompt: &str) -> Result<String, ReasoningError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ReasoningError::unavailable("script exhausted")))
    }
}
