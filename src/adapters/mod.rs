//! Adapters - implementations of the collaborator ports.
//!
//! Real Amadeus/OpenAI/Surge integrations live outside this core; these
//! adapters are the in-memory and scripted implementations used by the demo
//! binary and the test suite.

pub mod geo;
pub mod notify;
pub mod reasoning;
pub mod search;
pub mod status;
