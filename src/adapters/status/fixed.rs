//! Settable flight status source.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::trip::{FlightOffer, FlightStatus};
use crate::ports::StatusCheck;

/// `StatusCheck` implementation that reports a settable status for every
/// flight. Defaults to `on-time`.
#[derive(Debug, Clone, Default)]
pub struct FixedStatusCheck {
    status: Arc<Mutex<FlightStatus>>,
}

impl FixedStatusCheck {
    /// Creates a checker reporting `on-time`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the status reported from now on. Clones share the value.
    pub fn set(&self, status: FlightStatus) {
        *self.status.lock().unwrap() = status;
    }
}

#[async_trait]
impl StatusCheck for FixedStatusCheck {
    async fn check(&self, _flight: &FlightOffer) -> FlightStatus {
        *self.status.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight() -> FlightOffer {
        FlightOffer {
            id: "flight1".into(),
            origin: "JFK".into(),
            destination: "LAX".into(),
            depart_date: "2026-03-01".into(),
            return_date: None,
            price: 350.0,
            booking_link: "https://demo-booking.test/flight1".into(),
        }
    }

    #[tokio::test]
    async fn defaults_to_on_time() {
        let check = FixedStatusCheck::new();
        assert_eq!(check.check(&flight()).await, FlightStatus::OnTime);
    }

    #[tokio::test]
    async fn set_status_is_visible_through_clones() {
        let check = FixedStatusCheck::new();
        let handle = check.clone();
        handle.set(FlightStatus::Delayed);
        assert_eq!(check.check(&flight()).await, FlightStatus::Delayed);
    }
}
