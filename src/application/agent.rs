//! The trip orchestrator.
//!
//! `TripAgent` owns the session store and drives the trip state machine per
//! inbound message: constraint extraction, monotonic merge, completeness
//! check, flexible-date search, and the handoff to background monitoring.
//! Every user-visible branch ends in exactly one notification send.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::config::AgentConfig;
use crate::domain::foundation::StateMachine;
use crate::domain::trip::{FlightStatus, Trip, TripState};
use crate::ports::{LocationResolver, Notifier, OfferSearch, Reasoning, StatusCheck};

use super::{
    ConstraintExtractor, ExtractionOutcome, FlexibleDateSearch, MonitorHandle, SessionStore,
    TripMonitor,
};

/// Reserved keyword that clears the sender's session.
const RESET_KEYWORD: &str = "reset";

const GREETING: &str = "Hi! Tell me your trip idea (where, when, any constraints)?";
const RESET_ACK: &str = "Trip reset. Text me a new trip idea whenever you're ready.";
const CONFUSED: &str = "Sorry, I had trouble understanding that. Could you try rephrasing?";
const RESOLUTION_HINT: &str = "Please try an airport code or a major city name.";
const NO_PLAN: &str =
    "Sorry, I couldn't find any trips matching your request. Try again with different details?";
const STILL_PLANNING: &str = "Still working on your trip plan!";
const ALREADY_PLANNED: &str = "Your trip is already planned or in progress.";

/// The conversational trip planning agent.
///
/// Construct one per process (or per test); sessions are keyed by user
/// endpoint, so concurrent users never evict each other.
pub struct TripAgent {
    sessions: SessionStore,
    extractor: ConstraintExtractor,
    search: FlexibleDateSearch,
    monitor: Arc<TripMonitor>,
    notifier: Arc<dyn Notifier>,
    config: AgentConfig,
    monitor_handle: StdMutex<Option<MonitorHandle>>,
}

impl TripAgent {
    pub fn new(
        config: AgentConfig,
        reasoning: Arc<dyn Reasoning>,
        resolver: Arc<dyn LocationResolver>,
        offers: Arc<dyn OfferSearch>,
        status: Arc<dyn StatusCheck>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let sessions: SessionStore = Arc::new(Mutex::new(HashMap::new()));
        let monitor = Arc::new(TripMonitor::new(
            Arc::clone(&sessions),
            Arc::clone(&offers),
            status,
            Arc::clone(&notifier),
            config.price_drop_threshold,
        ));
        Self {
            sessions,
            extractor: ConstraintExtractor::new(reasoning, resolver),
            search: FlexibleDateSearch::new(offers, config.flex_window_days),
            monitor,
            notifier,
            config,
            monitor_handle: StdMutex::new(None),
        }
    }

    /// Handles one inbound message and returns the reply text.
    ///
    /// The same text is delivered through the notifier; a delivery failure
    /// is logged and never rolls back a committed transition.
    pub async fn handle_message(&self, endpoint: &str, message: &str) -> String {
        let mut sessions = self.sessions.lock().await;

        if message.trim().eq_ignore_ascii_case(RESET_KEYWORD) {
            sessions.remove(endpoint);
            tracing::info!(%endpoint, "trip reset");
            return self.reply(endpoint, RESET_ACK).await;
        }

        if let Some(trip) = sessions.get_mut(endpoint) {
            return match trip.state {
                TripState::CollectingInfo => self.handle_collecting(trip, message).await,
                // Reentrancy guard: a previous turn's search is still in
                // flight for this trip.
                TripState::Planning => self.reply(endpoint, STILL_PLANNING).await,
                _ => self.reply(endpoint, ALREADY_PLANNED).await,
            };
        }

        // First contact from this endpoint: the triggering message is not
        // parsed for constraints.
        let mut trip = Trip::new(endpoint);
        trip.trace("trip started");
        tracing::info!(%endpoint, trip_id = %trip.id(), "trip started");
        sessions.insert(endpoint.to_string(), trip);
        self.reply(endpoint, GREETING).await
    }

    async fn handle_collecting(&self, trip: &mut Trip, message: &str) -> String {
        let endpoint = trip.user_endpoint().to_string();
        trip.record_turn(message);
        let today = Utc::now().date_naive();

        let prior = trip.history.len() - 1;
        let outcome = self
            .extractor
            .extract(&trip.history[..prior], message, today)
            .await;

        let extracted = match outcome {
            Err(err) => {
                tracing::warn!(%err, trip_id = %trip.id(), "extraction failed");
                return self.reply(&endpoint, CONFUSED).await;
            }
            Ok(ExtractionOutcome::Unresolved(failures)) => {
                // Codes are required to proceed, so this turn's partial
                // constraints are discarded, not merged.
                let text = format!("{} {}", failures.join(" "), RESOLUTION_HINT);
                return self.reply(&endpoint, text).await;
            }
            Ok(ExtractionOutcome::Constraints(constraints)) => constraints,
        };

        trip.constraints.merge(&extracted);
        trip.update_last_turn_constraints();
        trip.trace(format!(
            "parsed constraints: {}",
            serde_json::to_string(&trip.constraints).unwrap_or_default()
        ));

        let missing = trip.constraints.missing_required();
        if !missing.is_empty() {
            let question = self.extractor.follow_up(&trip.constraints, &missing).await;
            return self.reply(&endpoint, question).await;
        }

        advance(trip, TripState::Planning);
        trip.trace("constraints complete, searching flexible window");
        tracing::info!(trip_id = %trip.id(), "constraints complete, searching");

        match self.search.find_plan(&trip.constraints).await {
            None => {
                advance(trip, TripState::CollectingInfo);
                trip.trace("no viable plan in flexible window");
                self.reply(&endpoint, NO_PLAN).await
            }
            Some(plan) => {
                let origin = trip.constraints.origin.clone().unwrap_or_default();
                let destination = trip.constraints.destination.clone().unwrap_or_default();
                let summary = plan.summary(&origin, &destination);
                trip.trace(format!("plan selected for {}", plan.flight.depart_date));
                trip.plan = Some(plan);
                advance(trip, TripState::Monitoring);
                trip.update_last_turn_plan();
                tracing::info!(trip_id = %trip.id(), state = %trip.state, "plan ready");
                self.reply(&endpoint, summary).await
            }
        }
    }

    /// Forces the booked flight to `delayed` and notifies. Idempotent-safe:
    /// repeating re-sets the same status and re-sends the notification.
    /// Returns false when no active flight exists for the endpoint.
    pub async fn simulate_delay(&self, endpoint: &str) -> bool {
        self.force_status(endpoint, FlightStatus::Delayed).await
    }

    /// Forces the booked flight to `cancelled` and notifies.
    pub async fn simulate_cancellation(&self, endpoint: &str) -> bool {
        self.force_status(endpoint, FlightStatus::Cancelled).await
    }

    async fn force_status(&self, endpoint: &str, status: FlightStatus) -> bool {
        let mut sessions = self.sessions.lock().await;
        let Some(trip) = sessions.get_mut(endpoint) else {
            return false;
        };
        let Some(plan) = trip.plan.as_mut() else {
            return false;
        };
        plan.flight_status = status;
        trip.trace(format!("flight status forced to {}", status));
        tracing::info!(trip_id = %trip.id(), %status, "flight status forced");
        self.reply(endpoint, format!("Flight status update: {}", status))
            .await;
        true
    }

    /// Starts the background monitor if enabled and not already running.
    pub fn start_monitor(&self) {
        if !self.config.enable_monitor {
            tracing::debug!("monitor disabled by configuration");
            return;
        }
        let mut guard = self
            .monitor_handle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.is_some() {
            return;
        }
        let period = Duration::from_secs(self.config.monitor_interval_secs);
        *guard = Some(Arc::clone(&self.monitor).spawn(period));
        tracing::info!(period_secs = self.config.monitor_interval_secs, "monitor started");
    }

    /// Stops the background monitor. Safe to call when not running.
    pub fn stop_monitor(&self) {
        let mut guard = self
            .monitor_handle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(handle) = guard.take() {
            handle.stop();
            tracing::info!("monitor stopped");
        }
    }

    /// Runs one monitor pass synchronously. Intended for tests and manual
    /// drivers where the interval loop is disabled.
    pub async fn run_monitor_tick(&self) {
        self.monitor.tick().await;
    }

    /// Returns a point-in-time copy of the endpoint's trip, if any.
    pub async fn trip_snapshot(&self, endpoint: &str) -> Option<Trip> {
        self.sessions.lock().await.get(endpoint).cloned()
    }

    async fn reply(&self, endpoint: &str, text: impl Into<String>) -> String {
        let text = text.into();
        if let Err(err) = self.notifier.send(endpoint, &text).await {
            tracing::warn!(%err, %endpoint, "notification send failed");
        }
        text
    }
}

impl Drop for TripAgent {
    fn drop(&mut self) {
        self.stop_monitor();
    }
}

/// Applies a validated state transition, logging instead of panicking on an
/// invalid move.
fn advance(trip: &mut Trip, target: TripState) {
    match trip.state.transition_to(target) {
        Ok(next) => trip.state = next,
        Err(err) => {
            tracing::error!(%err, trip_id = %trip.id(), "refused invalid state transition");
        }
    }
}
