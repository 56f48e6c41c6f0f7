//! Notifications published by the directory.

use super::{CapabilityId, ServiceTarget};

/// Change to the set of registered capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    /// A target was registered or re-registered.
    Registered(ServiceTarget),
    /// A known target deregistered itself.
    Deregistered(ServiceTarget),
    /// A capability was removed by id, e.g. during stale cleanup.
    Removed(CapabilityId),
}

impl DirectoryEvent {
    /// Returns the id of the affected capability.
    #[must_use]
    pub const fn capability_id(&self) -> &CapabilityId {
        match self {
            Self::Registered(target) | Self::Deregistered(target) => target.id(),
            Self::Removed(id) => id,
        }
    }
}
