//! Flight status adapters.

mod fixed;

pub use fixed::FixedStatusCheck;
