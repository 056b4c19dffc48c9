//! Ports - interfaces for the collaborators the agent depends on.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! orchestration core and the outside world. Adapters implement these ports.
//!
//! - `Reasoning` - free-text in, free-text out LLM calls
//! - `LocationResolver` - place name to location code
//! - `OfferSearch` - flight and hotel inventory search
//! - `StatusCheck` - flight status lookups
//! - `Notifier` - outbound user notifications (SMS)

mod location_resolver;
mod notifier;
mod offer_search;
mod reasoning;
mod status_check;

pub use location_resolver::LocationResolver;
pub use notifier::{Notifier, NotifyError};
pub use offer_search::OfferSearch;
pub use reasoning::{Reasoning, ReasoningError};
pub use status_check::StatusCheck;
