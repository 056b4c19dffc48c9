//! Reasoning adapters.

mod scripted;

pub use scripted::ScriptedReasoning;
