//! Application configuration module.
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `TRIP_AGENT`
//! prefix and `__` as the nesting separator, e.g.
//! `TRIP_AGENT__AGENT__MONITOR_INTERVAL_SECS=30`.

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration load failed: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors raised by semantic validation of loaded values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("agent.monitor_interval_secs must be at least 1")]
    MonitorIntervalTooSmall,

    #[error("agent.price_drop_threshold must be a non-negative finite number, got {actual}")]
    InvalidPriceDropThreshold { actual: f64 },

    #[error("agent.flex_window_days must be between 0 and 14, got {actual}")]
    FlexWindowOutOfRange { actual: i64 },
}

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Agent behavior knobs.
    #[serde(default)]
    pub agent: AgentConfig,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// Reads a `.env` file if present (development), then environment
    /// variables with the `TRIP_AGENT` prefix. Every field has a default,
    /// so an empty environment is valid.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRIP_AGENT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.agent.validate()
    }
}

/// Agent behavior configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Seconds between monitor ticks.
    pub monitor_interval_secs: u64,
    /// Price drop (currency units) that must be strictly exceeded before a
    /// cheaper-flight notification fires.
    pub price_drop_threshold: f64,
    /// Days either side of the requested departure date to search.
    pub flex_window_days: i64,
    /// Whether the background monitor runs at all. Disabled in tests.
    pub enable_monitor: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            monitor_interval_secs: 60,
            price_drop_threshold: 50.0,
            flex_window_days: 3,
            enable_monitor: true,
        }
    }
}

impl AgentConfig {
    /// Returns a config with the monitor disabled, for tests and drivers
    /// that tick manually.
    pub fn without_monitor() -> Self {
        Self {
            enable_monitor: false,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.monitor_interval_secs == 0 {
            return Err(ConfigValidationError::MonitorIntervalTooSmall);
        }
        if !self.price_drop_threshold.is_finite() || self.price_drop_threshold < 0.0 {
            return Err(ConfigValidationError::InvalidPriceDropThreshold {
                actual: self.price_drop_threshold,
            });
        }
        if !(0..=14).contains(&self.flex_window_days) {
            return Err(ConfigValidationError::FlexWindowOutOfRange {
                actual: self.flex_window_days,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_behavior() {
        let config = AgentConfig::default();
        assert_eq!(config.monitor_interval_secs, 60);
        assert_eq!(config.price_drop_threshold, 50.0);
        assert_eq!(config.flex_window_days, 3);
        assert!(config.enable_monitor);
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_interval_fails_validation() {
        let config = AgentConfig {
            monitor_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::MonitorIntervalTooSmall)
        );
    }

    #[test]
    fn negative_threshold_fails_validation() {
        let config = AgentConfig {
            price_drop_threshold: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidPriceDropThreshold { .. })
        ));
    }

    #[test]
    fn oversized_window_fails_validation() {
        let config = AgentConfig {
            flex_window_days: 30,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::FlexWindowOutOfRange { actual: 30 })
        ));
    }

    #[test]
    fn without_monitor_disables_only_the_monitor() {
        let config = AgentConfig::without_monitor();
        assert!(!config.enable_monitor);
        assert_eq!(config.monitor_interval_secs, 60);
    }
}
