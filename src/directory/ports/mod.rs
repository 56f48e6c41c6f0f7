//! Port contracts for capability directory persistence.
//!
//! The directory service depends only on these traits; any storage that
//! can fulfil them is a valid backing store.

mod activity_store;
mod capability_store;

pub use activity_store::{ActivityMutation, ActivityStore};
pub use capability_store::CapabilityStore;
