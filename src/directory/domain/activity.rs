//! Liveness and health history of a capability.

use super::{CapabilityId, ServiceState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Liveness companion of a [`ServiceTarget`](super::ServiceTarget), keyed by
/// the same id.
///
/// Either record may exist without the other: the two stores are updated
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    id: CapabilityId,
    last_seen: Option<DateTime<Utc>>,
    active: bool,
    states: Vec<ServiceState>,
}

impl ActivityRecord {
    /// Creates an empty, inactive record that has never been seen.
    #[must_use]
    pub const fn new(id: CapabilityId) -> Self {
        Self {
            id,
            last_seen: None,
            active: false,
            states: Vec::new(),
        }
    }

    /// Returns the capability identifier.
    #[must_use]
    pub const fn id(&self) -> &CapabilityId {
        &self.id
    }

    /// Returns when the provider last pinged or deregistered.
    #[must_use]
    pub const fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.last_seen
    }

    /// Returns whether the provider is considered live.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the health history, oldest first.
    #[must_use]
    pub fn states(&self) -> &[ServiceState] {
        &self.states
    }

    /// Returns the most recent observation.
    #[must_use]
    pub fn last_state(&self) -> Option<&ServiceState> {
        self.states.last()
    }

    /// Marks the provider live as of `now`.
    ///
    /// `last_seen` never moves backwards, even if the clock does.
    pub fn record_ping(&mut self, now: DateTime<Utc>) {
        self.touch(now);
        self.active = true;
    }

    /// Marks the provider gone as of `now` and appends an
    /// [`Inactive`](super::ServiceHealth::Inactive) entry.
    ///
    /// Returns the number of evicted history entries.
    pub fn record_deregistration(&mut self, now: DateTime<Utc>, max_states: NonZeroUsize) -> usize {
        self.touch(now);
        self.active = false;
        self.push_state(ServiceState::inactive(now), max_states)
    }

    /// Appends `state`, keeping the history within `max_states`.
    ///
    /// When the append would overflow, the oldest half of the bound is
    /// dropped in one batch. Returns the number of evicted entries.
    pub fn push_state(&mut self, state: ServiceState, max_states: NonZeroUsize) -> usize {
        let evicted = eviction_count(self.states.len(), max_states);
        if evicted > 0 {
            self.states.drain(..evicted);
        }
        self.states.push(state);
        evicted
    }

    /// Appends a missing-in-action marker if the history is empty.
    ///
    /// Returns whether the marker was added.
    pub fn backfill_missing_in_action(&mut self, now: DateTime<Utc>) -> bool {
        if !self.states.is_empty() {
            return false;
        }
        self.states.push(ServiceState::missing_in_action(now));
        true
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen = Some(self.last_seen.map_or(now, |previous| previous.max(now)));
    }
}

/// Number of entries to drop before appending to a history of `len`.
///
/// Zero unless the append would exceed `max`; otherwise half the bound, or
/// more when the history already overflows (e.g. after the bound shrank).
fn eviction_count(len: usize, max: NonZeroUsize) -> usize {
    let bound = max.get();
    if len < bound {
        return 0;
    }
    let overflow = len.saturating_add(1).saturating_sub(bound);
    bound.div_euclid(2).max(overflow).min(len)
}
