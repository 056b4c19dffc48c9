//! Application layer - the orchestration services over the ports.

mod agent;
mod extraction;
mod flexible_search;
mod monitor;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::trip::Trip;

/// Shared session store, keyed by user endpoint.
///
/// One lock serializes message turns and monitor ticks, so neither ever
/// observes the other's partial mutation of a trip.
pub(crate) type SessionStore = Arc<Mutex<HashMap<String, Trip>>>;

pub use agent::TripAgent;
pub use extraction::{ConstraintExtractor, ExtractionOutcome};
pub use flexible_search::FlexibleDateSearch;
pub use monitor::{MonitorHandle, TripMonitor};
