//! Flexible-date search.
//!
//! Exact-date inventory is sparse, so the search widens the departure date
//! into a window of nearby candidates and takes the first date with joint
//! flight and hotel availability. Greedy by date, not cheapest across the
//! window.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::trip::{TripConstraints, TripPlan};
use crate::ports::OfferSearch;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Searches a window of candidate departure dates for a viable plan.
pub struct FlexibleDateSearch {
    search: Arc<dyn OfferSearch>,
    window_days: i64,
}

impl FlexibleDateSearch {
    /// Creates a search over `depart - window_days ..= depart + window_days`.
    pub fn new(search: Arc<dyn OfferSearch>, window_days: i64) -> Self {
        Self { search, window_days }
    }

    /// Finds the first candidate date with both a flight and a hotel.
    ///
    /// Returns `None` when the constraints have no departure date or no
    /// candidate yields joint availability.
    pub async fn find_plan(&self, constraints: &TripConstraints) -> Option<TripPlan> {
        let base = constraints.depart_date.as_deref()?;

        for candidate in candidate_dates(base, self.window_days) {
            let attempt = constraints.with_depart_date(&candidate);
            let flights = self.search.search_flights(&attempt).await;
            if flights.is_empty() {
                continue;
            }
            let hotels = self.search.search_hotels(&attempt).await;
            if hotels.is_empty() {
                continue;
            }
            tracing::info!(date = %candidate, "flexible search found joint availability");
            let flight = flights[0].clone();
            let hotel = hotels[0].clone();
            return Some(TripPlan::new(flight, hotel, flights, hotels));
        }

        tracing::info!(depart = %base, "no candidate date had joint availability");
        None
    }
}

/// Candidate departure dates in chronological order, `base-window` through
/// `base+window`. An unparseable base date yields just the original string.
fn candidate_dates(base: &str, window_days: i64) -> Vec<String> {
    match NaiveDate::parse_from_str(base, DATE_FORMAT) {
        Ok(date) => (-window_days..=window_days)
            .map(|offset| {
                (date + chrono::Duration::days(offset))
                    .format(DATE_FORMAT)
                    .to_string()
            })
            .collect(),
        Err(_) => vec![base.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::search::DemoOfferSearch;

    fn constraints() -> TripConstraints {
        TripConstraints {
            origin: Some("JFK".into()),
            destination: Some("LAX".into()),
            depart_date: Some("2026-03-01".into()),
            return_date: Some("2026-03-10".into()),
            travelers: Some(2),
        }
    }

    #[test]
    fn candidates_run_from_minus_window_to_plus_window() {
        let dates = candidate_dates("2026-03-01", 3);
        assert_eq!(
            dates,
            vec![
                "2026-02-26",
                "2026-02-27",
                "2026-02-28",
                "2026-03-01",
                "2026-03-02",
                "2026-03-03",
                "2026-03-04",
            ]
        );
    }

    #[test]
    fn unparseable_base_date_yields_single_candidate() {
        assert_eq!(candidate_dates("sometime in March", 3), vec!["sometime in March"]);
    }

    #[tokio::test]
    async fn picks_first_date_with_joint_availability() {
        let search = DemoOfferSearch::new().with_available_dates(["2026-03-03"]);
        let plan = FlexibleDateSearch::new(Arc::new(search), 3)
            .find_plan(&constraints())
            .await
            .expect("plan");
        assert_eq!(plan.flight.depart_date, "2026-03-03");
        assert_eq!(plan.hotel.checkin, "2026-03-03");
    }

    #[tokio::test]
    async fn no_availability_in_window_yields_no_plan() {
        let search = DemoOfferSearch::new().with_available_dates(["2026-04-20"]);
        let plan = FlexibleDateSearch::new(Arc::new(search), 3)
            .find_plan(&constraints())
            .await;
        assert!(plan.is_none());
    }

    #[tokio::test]
    async fn missing_depart_date_yields_no_plan() {
        let search = DemoOfferSearch::new();
        let plan = FlexibleDateSearch::new(Arc::new(search), 3)
            .find_plan(&TripConstraints::new())
            .await;
        assert!(plan.is_none());
    }

    #[tokio::test]
    async fn selected_offers_are_heads_of_the_alternative_lists() {
        let search = DemoOfferSearch::new();
        let plan = FlexibleDateSearch::new(Arc::new(search), 3)
            .find_plan(&constraints())
            .await
            .expect("plan");
        assert_eq!(plan.flight, plan.flight_alternatives[0]);
        assert_eq!(plan.hotel, plan.hotel_alternatives[0]);
    }
}
