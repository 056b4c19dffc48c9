//! Demo offer inventory.
//!
//! Serves a stable, deterministic flight+hotel inventory so the demo binary
//! and the tests can exercise search, planning and monitoring without a
//! supplier API. Availability can be restricted to specific departure dates
//! and the flight price can be moved between calls to drive the monitor's
//! price-drop checks.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::trip::{FlightOffer, HotelOffer, TripConstraints};
use crate::ports::OfferSearch;

const DEFAULT_FLIGHT_PRICE: f64 = 350.0;
const DEFAULT_HOTEL_PRICE: f64 = 900.0;

/// Configurable in-memory implementation of the `OfferSearch` port.
#[derive(Debug, Clone)]
pub struct DemoOfferSearch {
    /// Depart dates with availability; `None` means every date.
    available_dates: Option<HashSet<String>>,
    flight_price: Arc<Mutex<f64>>,
    hotel_price: f64,
}

impl DemoOfferSearch {
    /// Creates an inventory with availability on every date.
    pub fn new() -> Self {
        Self {
            available_dates: None,
            flight_price: Arc::new(Mutex::new(DEFAULT_FLIGHT_PRICE)),
            hotel_price: DEFAULT_HOTEL_PRICE,
        }
    }

    /// Restricts availability to the given departure dates.
    pub fn with_available_dates<I, S>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available_dates = Some(dates.into_iter().map(Into::into).collect());
        self
    }

    /// Moves the flight price for subsequent searches. Clones share the
    /// price, so a handle kept by a test steers what the monitor sees.
    pub fn set_flight_price(&self, price: f64) {
        *self.flight_price.lock().unwrap() = price;
    }

    fn has_availability(&self, constraints: &TripConstraints) -> bool {
        match (&self.available_dates, &constraints.depart_date) {
            (None, Some(_)) => true,
            (Some(dates), Some(depart)) => dates.contains(depart),
            // No departure date, no inventory.
            (_, None) => false,
        }
    }
}

impl Default for DemoOfferSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OfferSearch for DemoOfferSearch {
    async fn search_flights(&self, constraints: &TripConstraints) -> Vec<FlightOffer> {
        if !self.has_availability(constraints) {
            return Vec::new();
        }
        let depart = constraints.depart_date.clone().unwrap_or_default();
        vec![FlightOffer {
            id: "flight1".into(),
            origin: constraints.origin.clone().unwrap_or_else(|| "JFK".into()),
            destination: constraints
                .destination
                .clone()
                .unwrap_or_else(|| "LAX".into()),
            depart_date: depart,
            return_date: constraints.return_date.clone(),
            price: *self.flight_price.lock().unwrap(),
            booking_link: "https://demo-booking.test/flight1".into(),
        }]
    }

    async fn search_hotels(&self, constraints: &TripConstraints) -> Vec<HotelOffer> {
        if !self.has_availability(constraints) {
            return Vec::new();
        }
        let checkin = constraints.depart_date.clone().unwrap_or_default();
        vec![HotelOffer {
            id: "hotel1".into(),
            name: "Demo Hotel".into(),
            city: constraints
                .destination
                .clone()
                .unwrap_or_else(|| "LAX".into()),
            checkin,
            checkout: constraints.return_date.clone(),
            price: self.hotel_price,
            booking_link: "https://demo-booking.test/hotel1".into(),
        }]
    }
}
