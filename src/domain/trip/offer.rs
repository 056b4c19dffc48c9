//! Flight and hotel offers and the selected trip plan.

use serde::{Deserialize, Serialize};

/// Operational status of a flight.
///
/// Any change is informational; no ordering is enforced beyond "changed"
/// detection by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FlightStatus {
    #[default]
    OnTime,
    Delayed,
    Cancelled,
}

impl std::fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FlightStatus::OnTime => "on-time",
            FlightStatus::Delayed => "delayed",
            FlightStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// A single flight offer returned by the search collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub depart_date: String,
    pub return_date: Option<String>,
    pub price: f64,
    pub booking_link: String,
}

/// A single hotel offer returned by the search collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOffer {
    pub id: String,
    pub name: String,
    pub city: String,
    pub checkin: String,
    pub checkout: Option<String>,
    pub price: f64,
    pub booking_link: String,
}

/// The selected flight+hotel pair plus the alternatives considered.
///
/// `flight_status` starts `on-time` and is updated only by the monitor or
/// the simulation hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub flight: FlightOffer,
    pub flight_status: FlightStatus,
    pub hotel: HotelOffer,
    pub flight_alternatives: Vec<FlightOffer>,
    pub hotel_alternatives: Vec<HotelOffer>,
}

impl TripPlan {
    /// Creates a plan from the chosen offers, attaching the synthetic
    /// initial `on-time` status and retaining the full ranked lists.
    pub fn new(
        flight: FlightOffer,
        hotel: HotelOffer,
        flight_alternatives: Vec<FlightOffer>,
        hotel_alternatives: Vec<HotelOffer>,
    ) -> Self {
        Self {
            flight,
            flight_status: FlightStatus::OnTime,
            hotel,
            flight_alternatives,
            hotel_alternatives,
        }
    }

    /// One-line SMS summary of the selected offers.
    pub fn summary(&self, origin: &str, destination: &str) -> String {
        let dates = match self.flight.return_date.as_deref() {
            Some(ret) => format!("{} to {}", self.flight.depart_date, ret),
            None => self.flight.depart_date.clone(),
        };
        format!(
            "Trip plan ready! {} -> {}, {}\nFlight: ${:.0} - {}\nHotel: ${:.0} - {}",
            origin,
            destination,
            dates,
            self.flight.price,
            self.flight.booking_link,
            self.hotel.price,
            self.hotel.booking_link,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(price: f64) -> FlightOffer {
        FlightOffer {
            id: "flight1".into(),
            origin: "JFK".into(),
            destination: "LAX".into(),
            depart_date: "2026-03-01".into(),
            return_date: Some("2026-03-10".into()),
            price,
            booking_link: "https://demo-booking.test/flight1".into(),
        }
    }

    fn hotel() -> HotelOffer {
        HotelOffer {
            id: "hotel1".into(),
            name: "Demo Hotel".into(),
            city: "LAX".into(),
            checkin: "2026-03-01".into(),
            checkout: Some("2026-03-10".into()),
            price: 900.0,
            booking_link: "https://demo-booking.test/hotel1".into(),
        }
    }

    #[test]
    fn new_plan_starts_on_time() {
        let plan = TripPlan::new(flight(350.0), hotel(), vec![flight(350.0)], vec![hotel()]);
        assert_eq!(plan.flight_status, FlightStatus::OnTime);
    }

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&FlightStatus::OnTime).unwrap(),
            "\"on-time\""
        );
        assert_eq!(format!("{}", FlightStatus::Delayed), "delayed");
    }

    #[test]
    fn summary_contains_both_prices_and_links() {
        let plan = TripPlan::new(flight(350.0), hotel(), vec![], vec![]);
        let text = plan.summary("JFK", "LAX");
        assert!(text.contains("$350"));
        assert!(text.contains("https://demo-booking.test/flight1"));
        assert!(text.contains("$900"));
        assert!(text.contains("https://demo-booking.test/hotel1"));
        assert!(text.contains("2026-03-01 to 2026-03-10"));
    }
}
