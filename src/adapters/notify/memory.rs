//! Recording notifier for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{Notifier, NotifyError};

/// `Notifier` implementation that records every send and can be switched
/// into a failing mode to exercise the best-effort delivery paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    failing: Arc<Mutex<bool>>,
}

impl InMemoryNotifier {
    /// Creates a notifier that accepts every send.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent send fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Returns every `(endpoint, text)` pair delivered so far.
    ///
    /// Failed sends are not recorded.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Returns the messages delivered to one endpoint.
    pub fn sent_to(&self, endpoint: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| to == endpoint)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn send(&self, endpoint: &str, text: &str) -> Result<(), NotifyError> {
        if *self.failing.lock().unwrap() {
            return Err(NotifyError::delivery("simulated outage"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((endpoint.to_string(), text.to_string()));
        Ok(())
    }
}
