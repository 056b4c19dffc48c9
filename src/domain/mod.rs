//! Domain layer - pure types and business logic.

pub mod foundation;
pub mod trip;
