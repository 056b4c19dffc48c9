//! Trip Agent - SMS-driven conversational travel planning.
//!
//! This crate implements a per-endpoint travel planning agent: free-text
//! messages are turned into structured trip constraints through a reasoning
//! collaborator, flights and hotels are searched across a flexible date
//! window, and the resulting plan is monitored in the background for price
//! drops and flight status changes.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
