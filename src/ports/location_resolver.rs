//! Location resolver port - place names to location codes.

use async_trait::async_trait;

/// Port for resolving a free-text place name to a location code.
///
/// Resolution failure is represented as `None`, never as an error; the
/// caller turns an absent code into user-facing guidance.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Resolves a place name to an IATA-style location code.
    async fn resolve(&self, name: &str) -> Option<String>;
}
