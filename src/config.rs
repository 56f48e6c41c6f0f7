//! Runtime configuration for the capability directory.
//!
//! # Example
//!
//! ```
//! use capability_directory::config::DirectoryConfig;
//!
//! let config = DirectoryConfig::default().with_max_state_count(20);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.backend_timeout().as_millis(), 5000);
//! ```

use crate::directory::domain::{DEFAULT_MAX_AGE_SECONDS, DirectoryDomainError, StalenessQuery};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Overrides `max_state_count`.
pub const ENV_MAX_STATE_COUNT: &str = "CAPABILITY_DIRECTORY_MAX_STATE_COUNT";
/// Overrides `backend_timeout_ms`.
pub const ENV_BACKEND_TIMEOUT_MS: &str = "CAPABILITY_DIRECTORY_BACKEND_TIMEOUT_MS";
/// Overrides `default_stale_max_age_seconds`.
pub const ENV_STALE_MAX_AGE_SECONDS: &str = "CAPABILITY_DIRECTORY_STALE_MAX_AGE_SECONDS";
/// Overrides `event_buffer`.
pub const ENV_EVENT_BUFFER: &str = "CAPABILITY_DIRECTORY_EVENT_BUFFER";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment override could not be parsed.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Environment variable name.
        key: &'static str,
        /// Rejected raw value.
        value: String,
    },

    /// A bound that must be positive was zero.
    #[error("{field} must be greater than zero")]
    Zero {
        /// Offending field.
        field: &'static str,
    },

    /// The default staleness age was negative.
    #[error(transparent)]
    Staleness(#[from] DirectoryDomainError),
}

/// Tunables for the capability directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Maximum health-history entries kept per capability.
    pub max_state_count: usize,
    /// Upper bound on each backend call, in milliseconds.
    pub backend_timeout_ms: u64,
    /// Age used by staleness queries when the caller gives none.
    pub default_stale_max_age_seconds: i64,
    /// Capacity of the directory event channel.
    pub event_buffer: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            max_state_count: 10,
            backend_timeout_ms: 5_000,
            default_stale_max_age_seconds: DEFAULT_MAX_AGE_SECONDS,
            event_buffer: 64,
        }
    }
}

impl DirectoryConfig {
    /// Loads the defaults overlaid with `CAPABILITY_DIRECTORY_*` variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed or a resulting
    /// bound is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the defaults overlaid with values from `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is malformed or a resulting
    /// bound is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            max_state_count: overlay(&lookup, ENV_MAX_STATE_COUNT, defaults.max_state_count)?,
            backend_timeout_ms: overlay(
                &lookup,
                ENV_BACKEND_TIMEOUT_MS,
                defaults.backend_timeout_ms,
            )?,
            default_stale_max_age_seconds: overlay(
                &lookup,
                ENV_STALE_MAX_AGE_SECONDS,
                defaults.default_stale_max_age_seconds,
            )?,
            event_buffer: overlay(&lookup, ENV_EVENT_BUFFER, defaults.event_buffer)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the history bound.
    #[must_use]
    pub const fn with_max_state_count(mut self, count: usize) -> Self {
        self.max_state_count = count;
        self
    }

    /// Sets the backend call bound.
    #[must_use]
    pub const fn with_backend_timeout_ms(mut self, millis: u64) -> Self {
        self.backend_timeout_ms = millis;
        self
    }

    /// Sets the default staleness age.
    #[must_use]
    pub const fn with_default_stale_max_age_seconds(mut self, seconds: i64) -> Self {
        self.default_stale_max_age_seconds = seconds;
        self
    }

    /// Sets the event channel capacity.
    #[must_use]
    pub const fn with_event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity;
        self
    }

    /// Checks every bound.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Zero`] for a zero history bound, timeout or
    /// event buffer, and [`ConfigError::Staleness`] for a negative age.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.history_bound()?;
        if self.backend_timeout_ms == 0 {
            return Err(ConfigError::Zero {
                field: "backend_timeout_ms",
            });
        }
        if self.event_buffer == 0 {
            return Err(ConfigError::Zero {
                field: "event_buffer",
            });
        }
        self.default_staleness_query(false)?;
        Ok(())
    }

    /// Returns the history bound as a non-zero count.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Zero`] when `max_state_count` is zero.
    pub fn history_bound(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.max_state_count).ok_or(ConfigError::Zero {
            field: "max_state_count",
        })
    }

    /// Returns the backend call bound.
    #[must_use]
    pub const fn backend_timeout(&self) -> Duration {
        Duration::from_millis(self.backend_timeout_ms)
    }

    /// Builds a staleness query using the configured default age.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Staleness`] when the default age is negative.
    pub fn default_staleness_query(&self, inactive_only: bool) -> Result<StalenessQuery, ConfigError> {
        Ok(StalenessQuery::new(
            self.default_stale_max_age_seconds,
            inactive_only,
        )?)
    }
}

fn overlay<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}
