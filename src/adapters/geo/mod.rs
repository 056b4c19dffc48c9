//! Location resolution adapters.

mod static_resolver;

pub use static_resolver::StaticLocationResolver;
