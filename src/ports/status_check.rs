//! Status check port - operational flight status lookups.

use async_trait::async_trait;

use crate::domain::trip::{FlightOffer, FlightStatus};

/// Port for checking the current status of a booked flight.
#[async_trait]
pub trait StatusCheck: Send + Sync {
    /// Returns the flight's current operational status.
    async fn check(&self, flight: &FlightOffer) -> FlightStatus;
}
