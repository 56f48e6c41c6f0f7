//! Staleness query inputs and results.

use super::{ActivityRecord, DirectoryDomainError, ServiceTarget};
use chrono::{DateTime, TimeDelta, Utc};

/// Default age after which a capability counts as stale: one day.
pub const DEFAULT_MAX_AGE_SECONDS: i64 = 86_400;

/// Validated filter for the staleness query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessQuery {
    max_age_seconds: i64,
    inactive_only: bool,
}

impl StalenessQuery {
    /// Builds a query, rejecting negative ages.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::NegativeMaxAge`] when
    /// `max_age_seconds < 0`.
    pub const fn new(max_age_seconds: i64, inactive_only: bool) -> Result<Self, DirectoryDomainError> {
        if max_age_seconds < 0 {
            return Err(DirectoryDomainError::NegativeMaxAge(max_age_seconds));
        }
        Ok(Self {
            max_age_seconds,
            inactive_only,
        })
    }

    /// Returns the maximum tolerated silence in seconds.
    #[must_use]
    pub const fn max_age_seconds(&self) -> i64 {
        self.max_age_seconds
    }

    /// Returns whether only inactive capabilities are reported.
    #[must_use]
    pub const fn inactive_only(&self) -> bool {
        self.inactive_only
    }

    /// Returns the instant before which a capability is old enough.
    #[must_use]
    pub fn threshold(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::try_seconds(self.max_age_seconds)
            .and_then(|age| now.checked_sub_signed(age))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Decides whether a capability with the given activity is stale.
    ///
    /// A capability without an activity record is always stale.
    #[must_use]
    pub fn is_stale(&self, activity: Option<&ActivityRecord>, now: DateTime<Utc>) -> bool {
        let Some(record) = activity else {
            return true;
        };
        let old_enough = record
            .last_seen()
            .is_none_or(|seen| seen < self.threshold(now));
        if self.inactive_only {
            old_enough && !record.is_active()
        } else {
            old_enough
        }
    }
}

impl Default for StalenessQuery {
    fn default() -> Self {
        Self {
            max_age_seconds: DEFAULT_MAX_AGE_SECONDS,
            inactive_only: false,
        }
    }
}

/// A registered capability reported by the staleness query, paired with
/// its activity record when one exists. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleCapability {
    /// The registered target.
    pub target: ServiceTarget,
    /// Its liveness record, absent if it never had one.
    ///
    /// A target registered but never pinged carries an empty record with no
    /// `last_seen`; it is still always reported as stale.
    pub activity: Option<ActivityRecord>,
}
