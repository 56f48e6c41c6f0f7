//! Aggregate liveness summary.

use super::{ActivityRecord, ServiceTarget, ServiceType};
use std::collections::BTreeMap;

/// Counts of registered capabilities by liveness and type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetStatus {
    /// Registered capabilities.
    pub total: usize,
    /// Capabilities currently marked active.
    pub active: usize,
    /// Capabilities seen at least once but no longer active.
    pub inactive: usize,
    /// Capabilities never pinged, with or without an activity record.
    pub never_seen: usize,
    /// Registered capabilities per service type.
    pub by_type: BTreeMap<ServiceType, usize>,
}

impl FleetStatus {
    /// Folds one target and its optional activity into the summary.
    pub fn record(&mut self, target: &ServiceTarget, activity: Option<&ActivityRecord>) {
        self.total = self.total.saturating_add(1);
        let per_type = self.by_type.entry(target.service_type()).or_default();
        *per_type = per_type.saturating_add(1);

        let bucket = match activity {
            Some(record) if record.is_active() => &mut self.active,
            Some(record) if record.last_seen().is_some() => &mut self.inactive,
            _ => &mut self.never_seen,
        };
        *bucket = bucket.saturating_add(1);
    }

    /// Returns whether every registered capability is active.
    #[must_use]
    pub const fn all_active(&self) -> bool {
        self.active == self.total
    }
}
