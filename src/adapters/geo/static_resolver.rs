//! Static city-to-airport-code resolver.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::ports::LocationResolver;

/// Table-backed implementation of the `LocationResolver` port.
///
/// Lookup is case-insensitive on the trimmed name. Anything absent from the
/// table resolves to `None`, matching the port's never-throws contract.
#[derive(Debug, Clone)]
pub struct StaticLocationResolver {
    codes: HashMap<String, String>,
}

impl StaticLocationResolver {
    /// Creates an empty resolver.
    pub fn empty() -> Self {
        Self {
            codes: HashMap::new(),
        }
    }

    /// Adds one name-to-code mapping.
    pub fn with_mapping(mut self, name: impl Into<String>, code: impl Into<String>) -> Self {
        self.codes.insert(name.into().to_lowercase(), code.into());
        self
    }
}

impl Default for StaticLocationResolver {
    /// Seeds the resolver with common city names and abbreviations.
    fn default() -> Self {
        let pairs = [
            ("nyc", "JFK"),
            ("new york", "JFK"),
            ("new york city", "JFK"),
            ("la", "LAX"),
            ("los angeles", "LAX"),
            ("sf", "SFO"),
            ("san francisco", "SFO"),
            ("chicago", "ORD"),
            ("miami", "MIA"),
            ("boston", "BOS"),
            ("seattle", "SEA"),
            ("london", "LHR"),
            ("paris", "CDG"),
            ("tokyo", "HND"),
        ];
        let mut resolver = Self::empty();
        for (name, code) in pairs {
            resolver = resolver.with_mapping(name, code);
        }
        resolver
    }
}

#[async_trait]
impl LocationResolver for StaticLocationResolver {
    async fn resolve(&self, name: &str) -> Option<String> {
        self.codes.get(&name.trim().to_lowercase()).cloned()
    }
}
