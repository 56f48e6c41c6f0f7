//! Storage-agnostic key/value layer under the capability and activity
//! stores.
//!
//! A [`KeyValueBackend`] holds JSON records grouped into named
//! collections. [`BoundedBackend`] caps every call at a configured
//! timeout. Failures are reported as [`StorageError`], whose
//! [`is_retryable`](StorageError::is_retryable) separates transient
//! outages from permanent faults.

pub mod adapters;
mod backend;
mod bounded;
pub mod codec;
mod error;

pub use backend::{KeyValueBackend, RecordPredicate, StoredRecord};
pub use bounded::BoundedBackend;
pub use error::{StorageError, StorageOperation, StorageResult};
