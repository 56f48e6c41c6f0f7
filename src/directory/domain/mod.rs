//! Domain model for the capability directory.
//!
//! Registered providers are described by a [`ServiceTarget`]; their
//! liveness and bounded health history live in a companion
//! [`ActivityRecord`] under the same [`CapabilityId`].

mod activity;
mod error;
mod event;
mod fleet;
mod ids;
mod service_type;
mod stale;
mod state;
mod target;

pub use activity::ActivityRecord;
pub use error::{DirectoryDomainError, ParseServiceTypeError};
pub use event::DirectoryEvent;
pub use fleet::FleetStatus;
pub use ids::{CapabilityId, MAX_CAPABILITY_ID_LENGTH};
pub use service_type::ServiceType;
pub use stale::{DEFAULT_MAX_AGE_SECONDS, StaleCapability, StalenessQuery};
pub use state::{ServiceHealth, ServiceState};
pub use target::ServiceTarget;
