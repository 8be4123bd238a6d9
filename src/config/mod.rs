//! Kitchen configuration.
//!
//! Timing is expressed in ticks of `time_unit_ms`: the waiter produces an order every
//! `cadence_ticks` units and the cook polls readiness every `poll_ticks` units.

mod loader;

pub use loader::{load_config, load_config_from_str, load_config_or_default};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid config: {0}")]
    ValidationError(String),
}

/// Configuration for the kitchen workers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenConfig {
    /// Name the cook signs tickets with.
    #[serde(default = "default_cook_name")]
    pub cook_name: String,

    /// Length of one time unit (milliseconds).
    #[serde(default = "default_time_unit_ms")]
    pub time_unit_ms: u64,

    /// Time units the waiter sleeps between two orders.
    #[serde(default = "default_cadence_ticks")]
    pub cadence_ticks: u32,

    /// Time units between two readiness checks while an order is being prepared.
    #[serde(default = "default_poll_ticks")]
    pub poll_ticks: u32,
}

fn default_cook_name() -> String {
    "Ramon".to_string()
}

fn default_time_unit_ms() -> u64 {
    1000 // 1 second
}

fn default_cadence_ticks() -> u32 {
    5
}

fn default_poll_ticks() -> u32 {
    1
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            cook_name: default_cook_name(),
            time_unit_ms: default_time_unit_ms(),
            cadence_ticks: default_cadence_ticks(),
            poll_ticks: default_poll_ticks(),
        }
    }
}

impl KitchenConfig {
    pub fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }

    /// Pause between two orders taken by the waiter. Saturates on a config that does not
    /// [`validate`](Self::validate).
    pub fn cadence(&self) -> Duration {
        self.time_unit().saturating_mul(self.cadence_ticks)
    }

    /// Pause between two readiness checks of the cook.
    pub fn poll_interval(&self) -> Duration {
        self.time_unit().saturating_mul(self.poll_ticks)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cook_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "cook_name must not be empty".to_string(),
            ));
        }
        if self.time_unit_ms == 0 {
            return Err(ConfigError::ValidationError(
                "time_unit_ms must be greater than 0".to_string(),
            ));
        }
        if self.cadence_ticks == 0 {
            return Err(ConfigError::ValidationError(
                "cadence_ticks must be greater than 0".to_string(),
            ));
        }
        if self.poll_ticks == 0 {
            return Err(ConfigError::ValidationError(
                "poll_ticks must be greater than 0".to_string(),
            ));
        }
        if self.time_unit().checked_mul(self.cadence_ticks).is_none() {
            return Err(ConfigError::ValidationError(
                "cadence_ticks * time_unit_ms overflows".to_string(),
            ));
        }
        if self.time_unit().checked_mul(self.poll_ticks).is_none() {
            return Err(ConfigError::ValidationError(
                "poll_ticks * time_unit_ms overflows".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KitchenConfig::default();
        assert_eq!(config.cook_name, "Ramon");
        assert_eq!(config.cadence(), Duration::from_secs(5));
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_time_unit() {
        let config = KitchenConfig {
            time_unit_ms: 10,
            cadence_ticks: 3,
            poll_ticks: 2,
            ..Default::default()
        };
        assert_eq!(config.cadence(), Duration::from_millis(30));
        assert_eq!(config.poll_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_validate_rejects_zero_ticks() {
        let config = KitchenConfig {
            poll_ticks: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let config = KitchenConfig {
            cadence_ticks: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_intervals() {
        let config = KitchenConfig {
            time_unit_ms: u64::MAX,
            cadence_ticks: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let config = KitchenConfig {
            time_unit_ms: u64::MAX,
            cadence_ticks: 1,
            poll_ticks: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let config = KitchenConfig {
            time_unit_ms: u64::MAX,
            cadence_ticks: 1,
            poll_ticks: 1,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_cook_name() {
        let config = KitchenConfig {
            cook_name: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
