//! Activity store port.

use crate::directory::domain::{ActivityRecord, CapabilityId};
use crate::storage::StorageResult;
use async_trait::async_trait;

/// In-place change applied to a stored activity record.
///
/// Returns `true` when the record changed and must be written back.
pub type ActivityMutation = Box<dyn FnOnce(&mut ActivityRecord) -> bool + Send>;

/// Persistence contract for [`ActivityRecord`] records keyed by id.
///
/// Mutating calls are serialised per store so concurrent read-modify-write
/// cycles cannot lose updates.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Finds a record by id. Returns `None` when absent.
    async fn find_by_id(&self, id: &CapabilityId) -> StorageResult<Option<ActivityRecord>>;

    /// Stores `record` unless one with the same id exists.
    ///
    /// Returns whether the record was inserted.
    async fn insert_if_absent(&self, record: &ActivityRecord) -> StorageResult<bool>;

    /// Applies `mutation` to the record under `id`.
    ///
    /// Returns the record as it stands afterwards, or `None` without
    /// calling `mutation` when no record exists.
    async fn update(
        &self,
        id: &CapabilityId,
        mutation: ActivityMutation,
    ) -> StorageResult<Option<ActivityRecord>>;

    /// Deletes a record. Returns whether one was removed.
    async fn remove(&self, id: &CapabilityId) -> StorageResult<bool>;

    /// Returns every record in stable backend order.
    async fn list_all(&self) -> StorageResult<Vec<ActivityRecord>>;
}
