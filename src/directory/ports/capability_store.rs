//! Capability store port.

use crate::directory::domain::{CapabilityId, ServiceTarget};
use crate::storage::StorageResult;
use async_trait::async_trait;

/// Persistence contract for [`ServiceTarget`] records keyed by id.
#[async_trait]
pub trait CapabilityStore: Send + Sync {
    /// Inserts a target or fully replaces the one with the same id.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the backend fails.
    async fn put(&self, target: &ServiceTarget) -> StorageResult<()>;

    /// Finds a target by id. Returns `None` when absent.
    async fn find_by_id(&self, id: &CapabilityId) -> StorageResult<Option<ServiceTarget>>;

    /// Deletes a target. Returns whether one was removed.
    async fn remove(&self, id: &CapabilityId) -> StorageResult<bool>;

    /// Returns every registered target in stable backend order.
    async fn list_all(&self) -> StorageResult<Vec<ServiceTarget>>;
}
