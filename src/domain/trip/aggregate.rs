//! The Trip aggregate.
//!
//! One `Trip` tracks a single planning session for one user endpoint: its
//! lifecycle state, the constraints gathered so far, the selected plan, an
//! append-only reasoning trace and the full conversation history.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::Timestamp;

use super::{TripConstraints, TripPlan, TripState};

/// Unique identifier for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(Uuid);

impl TripId {
    /// Creates a new random TripId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TripId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TripId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One inbound message plus snapshots of what the trip looked like when the
/// turn was handled. The snapshots give the extractor multi-turn context and
/// make the session auditable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub message: String,
    pub constraints: TripConstraints,
    pub plan: Option<TripPlan>,
    pub received_at: Timestamp,
}

/// The trip aggregate. Mutated only by the orchestrator and the monitor,
/// always under the session-store lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    id: TripId,
    user_endpoint: String,
    pub state: TripState,
    pub constraints: TripConstraints,
    pub plan: Option<TripPlan>,
    /// Append-only textual trace of agent decisions.
    pub reasoning: Vec<String>,
    /// Full conversation memory for this session.
    pub history: Vec<ConversationTurn>,
}

impl Trip {
    /// Creates a fresh trip for an endpoint, ready to collect constraints.
    pub fn new(user_endpoint: impl Into<String>) -> Self {
        Self {
            id: TripId::new(),
            user_endpoint: user_endpoint.into(),
            state: TripState::CollectingInfo,
            constraints: TripConstraints::new(),
            plan: None,
            reasoning: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> TripId {
        self.id
    }

    pub fn user_endpoint(&self) -> &str {
        &self.user_endpoint
    }

    /// Returns true if this trip belongs to the given endpoint.
    pub fn belongs_to(&self, endpoint: &str) -> bool {
        self.user_endpoint == endpoint
    }

    /// Appends a turn with snapshots of the current constraints and plan.
    pub fn record_turn(&mut self, message: impl Into<String>) {
        self.history.push(ConversationTurn {
            message: message.into(),
            constraints: self.constraints.clone(),
            plan: self.plan.clone(),
            received_at: Timestamp::now(),
        });
    }

    /// Replaces the constraint snapshot of the latest turn with the merged
    /// result, so history reflects what each turn contributed.
    pub fn update_last_turn_constraints(&mut self) {
        let snapshot = self.constraints.clone();
        if let Some(turn) = self.history.last_mut() {
            turn.constraints = snapshot;
        }
    }

    /// Replaces the plan snapshot of the latest turn.
    pub fn update_last_turn_plan(&mut self) {
        let snapshot = self.plan.clone();
        if let Some(turn) = self.history.last_mut() {
            turn.plan = snapshot;
        }
    }

    /// Appends a timestamped entry to the reasoning trace.
    pub fn trace(&mut self, entry: impl Into<String>) {
        self.reasoning
            .push(format!("{} - {}", Timestamp::now().to_rfc3339(), entry.into()));
    }
}
