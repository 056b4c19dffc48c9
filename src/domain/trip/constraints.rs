//! Trip constraints - the partially-known parameters of a trip.

use serde::{Deserialize, Serialize};

/// Partially-filled travel constraints, built up across conversation turns.
///
/// Every field stays `None` until the extractor resolves it. Merging is
/// monotonic within a session: a field once set is only ever replaced by a
/// newer non-null value, never cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripConstraints {
    /// Origin location code (IATA-style).
    pub origin: Option<String>,
    /// Destination location code (IATA-style).
    pub destination: Option<String>,
    /// Departure date, normalized to `YYYY-MM-DD` by the extractor.
    pub depart_date: Option<String>,
    /// Return date, normalized to `YYYY-MM-DD`. Optional for planning.
    pub return_date: Option<String>,
    /// Number of travelers.
    pub travelers: Option<u32>,
}

impl TripConstraints {
    /// Creates an empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges another partial extraction into this one.
    ///
    /// Non-null incoming values win; null incoming values leave the stored
    /// value untouched.
    pub fn merge(&mut self, incoming: &TripConstraints) {
        merge_field(&mut self.origin, &incoming.origin);
        merge_field(&mut self.destination, &incoming.destination);
        merge_field(&mut self.depart_date, &incoming.depart_date);
        merge_field(&mut self.return_date, &incoming.return_date);
        if incoming.travelers.is_some() {
            self.travelers = incoming.travelers;
        }
    }

    /// Names of the required fields that are still missing.
    ///
    /// Origin, destination and departure date gate planning; the return date
    /// and traveler count never block a search.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.origin.is_none() {
            missing.push("origin");
        }
        if self.destination.is_none() {
            missing.push("destination");
        }
        if self.depart_date.is_none() {
            missing.push("departure date");
        }
        missing
    }

    /// Returns true when all required fields are present.
    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Returns a copy with the departure date replaced.
    pub fn with_depart_date(&self, date: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.depart_date = Some(date.into());
        copy
    }
}

fn merge_field(stored: &mut Option<String>, incoming: &Option<String>) {
    if let Some(value) = incoming {
        *stored = Some(value.clone());
    }
}
