//! Trip domain - the trip aggregate and its supporting types.

mod aggregate;
mod constraints;
mod extractor;
mod offer;
mod state;

pub use aggregate::{ConversationTurn, Trip, TripId};
pub use constraints::TripConstraints;
pub use extractor::{parse_reply, ConstraintDraft, ReplyParseError};
pub use offer::{FlightOffer, FlightStatus, HotelOffer, TripPlan};
pub use state::TripState;
