//! Store implementations over a [`KeyValueBackend`](crate::storage::KeyValueBackend).

mod kv_activity_store;
mod kv_capability_store;

pub use kv_activity_store::{ACTIVITY_COLLECTION, KvActivityStore};
pub use kv_capability_store::{CAPABILITY_COLLECTION, KvCapabilityStore};
