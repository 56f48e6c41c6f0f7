//! Point-in-time health observations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one health observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceHealth {
    /// The provider reported itself healthy.
    Healthy,
    /// The provider reported a fault.
    Unhealthy,
    /// The provider deregistered.
    Inactive,
    /// The provider registered but never reported.
    MissingInAction,
}

impl ServiceHealth {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
            Self::Inactive => "inactive",
            Self::MissingInAction => "missing_in_action",
        }
    }
}

impl fmt::Display for ServiceHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a capability's health history. Entries are never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceState {
    timestamp: DateTime<Utc>,
    health: ServiceHealth,
    message: String,
}

impl ServiceState {
    /// Creates an observation.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, health: ServiceHealth, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            health,
            message: message.into(),
        }
    }

    /// A healthy observation with no diagnostic.
    #[must_use]
    pub fn healthy(timestamp: DateTime<Utc>) -> Self {
        Self::new(timestamp, ServiceHealth::Healthy, "")
    }

    /// A failed observation carrying `reason`.
    #[must_use]
    pub fn unhealthy(timestamp: DateTime<Utc>, reason: impl Into<String>) -> Self {
        Self::new(timestamp, ServiceHealth::Unhealthy, reason)
    }

    /// Marker appended when a provider deregisters.
    #[must_use]
    pub fn inactive(timestamp: DateTime<Utc>) -> Self {
        Self::new(timestamp, ServiceHealth::Inactive, "service deregistered")
    }

    /// Marker synthesized for providers that never reported.
    #[must_use]
    pub fn missing_in_action(timestamp: DateTime<Utc>) -> Self {
        Self::new(
            timestamp,
            ServiceHealth::MissingInAction,
            "no state reported since registration",
        )
    }

    /// Returns when the observation was made.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the observed health.
    #[must_use]
    pub const fn health(&self) -> ServiceHealth {
        self.health
    }

    /// Returns whether the observation was healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self.health, ServiceHealth::Healthy)
    }

    /// Returns the free-text diagnostic.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
