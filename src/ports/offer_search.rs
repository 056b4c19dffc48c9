//! Offer search port - flight and hotel inventory.

use async_trait::async_trait;

use crate::domain::trip::{FlightOffer, HotelOffer, TripConstraints};

/// Port for searching travel inventory against a constraint set.
///
/// Both searches return ranked lists and have empty-result-on-failure
/// semantics: a collaborator outage looks identical to no availability.
#[async_trait]
pub trait OfferSearch: Send + Sync {
    /// Searches flights matching the constraints, best offer first.
    async fn search_flights(&self, constraints: &TripConstraints) -> Vec<FlightOffer>;

    /// Searches hotels matching the constraints, best offer first.
    async fn search_hotels(&self, constraints: &TripConstraints) -> Vec<HotelOffer>;
}
