//! Notification adapters.

mod console;
mod memory;

pub use console::ConsoleNotifier;
pub use memory::InMemoryNotifier;
