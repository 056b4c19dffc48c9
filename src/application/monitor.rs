//! Background trip monitor.
//!
//! On a fixed interval, re-searches flights for a price drop and re-checks
//! the booked flight's status. Both checks are independent; either, both or
//! neither may notify on a tick. Ticks share the session lock with message
//! handling, so a tick never observes a half-applied turn.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::trip::Trip;
use crate::ports::{Notifier, OfferSearch, StatusCheck};

use super::SessionStore;

/// Periodic watcher over every session that has a plan.
pub struct TripMonitor {
    sessions: SessionStore,
    search: Arc<dyn OfferSearch>,
    status: Arc<dyn StatusCheck>,
    notifier: Arc<dyn Notifier>,
    price_drop_threshold: f64,
}

impl TripMonitor {
    pub fn new(
        sessions: SessionStore,
        search: Arc<dyn OfferSearch>,
        status: Arc<dyn StatusCheck>,
        notifier: Arc<dyn Notifier>,
        price_drop_threshold: f64,
    ) -> Self {
        Self {
            sessions,
            search,
            status,
            notifier,
            price_drop_threshold,
        }
    }

    /// Spawns the interval loop. The first tick fires one full period after
    /// the spawn, not immediately.
    pub fn spawn(self: Arc<Self>, period: Duration) -> MonitorHandle {
        let monitor = self;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval's first tick completes immediately; swallow it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                monitor.tick().await;
            }
        });
        MonitorHandle { handle }
    }

    /// Runs one monitoring pass over all sessions.
    pub async fn tick(&self) {
        let mut sessions = self.sessions.lock().await;
        for trip in sessions.values_mut() {
            self.check_trip(trip).await;
        }
    }

    async fn check_trip(&self, trip: &mut Trip) {
        // A trip without a plan is a no-op tick.
        let (selected, stored_status) = match trip.plan.as_ref() {
            Some(plan) => (plan.flight.clone(), plan.flight_status),
            None => return,
        };
        let constraints = trip.constraints.clone();
        let endpoint = trip.user_endpoint().to_string();

        // Price drop: strictly more than the threshold cheaper fires; a drop
        // of exactly the threshold does not. Notification only, the selected
        // flight is never switched automatically.
        let candidates = self.search.search_flights(&constraints).await;
        if let Some(better) = candidates
            .iter()
            .find(|f| f.price < selected.price - self.price_drop_threshold)
        {
            tracing::info!(trip_id = %trip.id(), price = better.price, "cheaper flight found");
            trip.trace(format!("cheaper flight found at ${:.0}", better.price));
            self.notify(
                &endpoint,
                &format!(
                    "Found a cheaper flight: ${:.0}. Book: {}",
                    better.price, better.booking_link
                ),
            )
            .await;
        }

        // Status change: fires on difference only.
        let status = self.status.check(&selected).await;
        if status != stored_status {
            if let Some(plan) = trip.plan.as_mut() {
                plan.flight_status = status;
            }
            tracing::info!(trip_id = %trip.id(), %status, "flight status changed");
            trip.trace(format!("flight status changed to {}", status));
            self.notify(&endpoint, &format!("Flight status update: {}", status))
                .await;
        }
    }

    async fn notify(&self, endpoint: &str, text: &str) {
        if let Err(err) = self.notifier.send(endpoint, text).await {
            tracing::warn!(%err, %endpoint, "monitor notification failed");
        }
    }
}

/// Handle to a running monitor loop. Aborting the task is the only
/// cancellation primitive; dropping the handle stops the loop.
pub struct MonitorHandle {
    handle: JoinHandle<()>,
}

impl MonitorHandle {
    /// Stops the monitor loop.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use tokio::sync::Mutex;

    use crate::adapters::notify::InMemoryNotifier;
    use crate::adapters::search::DemoOfferSearch;
    use crate::adapters::status::FixedStatusCheck;
    use crate::domain::trip::{FlightStatus, TripConstraints, TripState};

    async fn store_with_planned_trip(search: &DemoOfferSearch) -> SessionStore {
        let mut trip = Trip::new("+1234567890");
        trip.constraints = TripConstraints {
            origin: Some("JFK".into()),
            destination: Some("LAX".into()),
            depart_date: Some("2026-03-01".into()),
            return_date: Some("2026-03-10".into()),
            travelers: Some(2),
        };
        let flights = search.search_flights(&trip.constraints).await;
        let hotels = search.search_hotels(&trip.constraints).await;
        trip.plan = Some(crate::domain::trip::TripPlan::new(
            flights[0].clone(),
            hotels[0].clone(),
            flights,
            hotels,
        ));
        trip.state = TripState::Monitoring;
        let mut sessions = HashMap::new();
        sessions.insert("+1234567890".to_string(), trip);
        Arc::new(Mutex::new(sessions))
    }

    fn monitor(
        sessions: SessionStore,
        search: DemoOfferSearch,
        status: FixedStatusCheck,
        notifier: InMemoryNotifier,
    ) -> TripMonitor {
        TripMonitor::new(
            sessions,
            Arc::new(search),
            Arc::new(status),
            Arc::new(notifier),
            50.0,
        )
    }

    #[tokio::test]
    async fn tick_without_plan_is_a_no_op() {
        let mut sessions = HashMap::new();
        sessions.insert("+1".to_string(), Trip::new("+1"));
        let store: SessionStore = Arc::new(Mutex::new(sessions));
        let notifier = InMemoryNotifier::new();
        let m = monitor(
            store,
            DemoOfferSearch::new(),
            FixedStatusCheck::new(),
            notifier.clone(),
        );
        m.tick().await;
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn price_drop_beyond_threshold_notifies() {
        let search = DemoOfferSearch::new(); // flights at $350
        let store = store_with_planned_trip(&search).await;
        search.set_flight_price(299.0); // $51 cheaper
        let notifier = InMemoryNotifier::new();
        let m = monitor(store, search, FixedStatusCheck::new(), notifier.clone());
        m.tick().await;
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("cheaper flight"));
        assert!(sent[0].1.contains("$299"));
    }

    #[tokio::test]
    async fn price_drop_of_exactly_threshold_does_not_notify() {
        let search = DemoOfferSearch::new();
        let store = store_with_planned_trip(&search).await;
        search.set_flight_price(300.0); // exactly $50 cheaper
        let notifier = InMemoryNotifier::new();
        let m = monitor(store, search, FixedStatusCheck::new(), notifier.clone());
        m.tick().await;
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn status_change_updates_plan_and_notifies_once() {
        let search = DemoOfferSearch::new();
        let store = store_with_planned_trip(&search).await;
        let status = FixedStatusCheck::new();
        status.set(FlightStatus::Delayed);
        let notifier = InMemoryNotifier::new();
        let m = monitor(
            Arc::clone(&store),
            search,
            status,
            notifier.clone(),
        );
        m.tick().await;
        // Second tick with the same status must not re-fire.
        m.tick().await;
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.contains("delayed"));
        let sessions = store.lock().await;
        let plan = sessions["+1234567890"].plan.as_ref().unwrap();
        assert_eq!(plan.flight_status, FlightStatus::Delayed);
    }

    #[tokio::test]
    async fn unchanged_status_and_stable_price_fire_nothing() {
        let search = DemoOfferSearch::new();
        let store = store_with_planned_trip(&search).await;
        let notifier = InMemoryNotifier::new();
        let m = monitor(store, search, FixedStatusCheck::new(), notifier.clone());
        m.tick().await;
        m.tick().await;
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn notification_failure_does_not_poison_the_tick() {
        let search = DemoOfferSearch::new();
        let store = store_with_planned_trip(&search).await;
        let status = FixedStatusCheck::new();
        status.set(FlightStatus::Cancelled);
        let notifier = InMemoryNotifier::new();
        notifier.set_failing(true);
        let m = monitor(Arc::clone(&store), search, status, notifier);
        m.tick().await;
        // Status was still committed despite the failed send.
        let sessions = store.lock().await;
        let plan = sessions["+1234567890"].plan.as_ref().unwrap();
        assert_eq!(plan.flight_status, FlightStatus::Cancelled);
    }
}
