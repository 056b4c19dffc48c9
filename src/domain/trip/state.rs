//! Trip state machine.
//!
//! Defines the lifecycle states of a trip and valid transitions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle state of a trip.
///
/// Trips move through these states from first contact to completion:
/// - `Idle`: No active trip for the endpoint
/// - `CollectingInfo`: Gathering constraints through conversation
/// - `Planning`: Flexible-date search in flight (transient within a turn)
/// - `Monitoring`: Plan selected, background checks running
/// - `Recovery`: Plan disrupted, rebooking support
/// - `Completed`: Trip finished, read-only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TripState {
    /// No trip exists yet for this endpoint.
    #[default]
    Idle,

    /// Collecting constraints from the user.
    CollectingInfo,

    /// Flexible-date search running. Only observable between the moment a
    /// turn enters the search and the moment it stores the outcome; a
    /// message arriving here hits the reentrancy guard.
    Planning,

    /// Plan booked, monitor watching prices and status.
    Monitoring,

    /// Plan disrupted and being recovered.
    Recovery,

    /// Trip finished.
    Completed,
}

impl TripState {
    /// Returns true if inbound messages are parsed for constraints.
    pub fn collects_constraints(&self) -> bool {
        matches!(self, Self::CollectingInfo)
    }

    /// Returns true if a plan may be attached in this state.
    pub fn allows_plan(&self) -> bool {
        matches!(self, Self::Monitoring | Self::Recovery | Self::Completed)
    }
}

impl StateMachine for TripState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use TripState::*;
        matches!(
            (self, target),
            // First message creates the trip
            (Idle, CollectingInfo) |
            // Required constraints complete, search starts
            (CollectingInfo, Planning) |
            // Search succeeded
            (Planning, Monitoring) |
            // Search failed, user re-enters details
            (Planning, CollectingInfo) |
            // Disruption detected while monitoring
            (Monitoring, Recovery) |
            // Trip ran to completion
            (Monitoring, Completed) |
            // Recovered back to a watched plan
            (Recovery, Monitoring) |
            (Recovery, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use TripState::*;
        match self {
            Idle => vec![CollectingInfo],
            CollectingInfo => vec![Planning],
            Planning => vec![Monitoring, CollectingInfo],
            Monitoring => vec![Recovery, Completed],
            Recovery => vec![Monitoring, Completed],
            Completed => vec![],
        }
    }
}

// Display matches the serde representation so logs and snapshots agree.
impl std::fmt::Display for TripState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TripState::Idle => "idle",
            TripState::CollectingInfo => "collecting_info",
            TripState::Planning => "planning",
            TripState::Monitoring => "monitoring",
            TripState::Recovery => "recovery",
            TripState::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}
