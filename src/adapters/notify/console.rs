//! Console notifier for the demo binary.

use async_trait::async_trait;

use crate::ports::{Notifier, NotifyError};

/// `Notifier` implementation that prints outbound messages instead of
/// delivering SMS. Used by the demo binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, endpoint: &str, text: &str) -> Result<(), NotifyError> {
        println!("[sms -> {}] {}", endpoint, text);
        Ok(())
    }
}
