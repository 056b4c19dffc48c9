//! Offer search adapters.

mod demo;

pub use demo::DemoOfferSearch;
