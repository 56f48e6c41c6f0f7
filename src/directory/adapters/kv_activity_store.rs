//! Activity store backed by a key/value backend.

use crate::directory::domain::{ActivityRecord, CapabilityId};
use crate::directory::ports::{ActivityMutation, ActivityStore};
use crate::storage::{KeyValueBackend, StorageResult, codec};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Collection holding serialised [`ActivityRecord`] records.
pub const ACTIVITY_COLLECTION: &str = "capability_activity";

/// [`ActivityStore`] persisting records as JSON in
/// [`ACTIVITY_COLLECTION`].
///
/// Every read-modify-write holds the store lock from read to write-back.
#[derive(Debug)]
pub struct KvActivityStore<B> {
    backend: Arc<B>,
    write_lock: Mutex<()>,
}

impl<B: KeyValueBackend> KvActivityStore<B> {
    /// Creates a store over a shared backend.
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    async fn read(&self, id: &CapabilityId) -> StorageResult<Option<ActivityRecord>> {
        self.backend
            .get(ACTIVITY_COLLECTION, id.as_str())
            .await?
            .map(|payload| codec::decode(ACTIVITY_COLLECTION, id.as_str(), payload))
            .transpose()
    }

    async fn write(&self, record: &ActivityRecord) -> StorageResult<()> {
        let id = record.id().as_str();
        let payload = codec::encode(ACTIVITY_COLLECTION, id, record)?;
        self.backend.put(ACTIVITY_COLLECTION, id, payload).await
    }
}

#[async_trait]
impl<B: KeyValueBackend> ActivityStore for KvActivityStore<B> {
    async fn find_by_id(&self, id: &CapabilityId) -> StorageResult<Option<ActivityRecord>> {
        self.read(id).await
    }

    async fn insert_if_absent(&self, record: &ActivityRecord) -> StorageResult<bool> {
        let _guard = self.write_lock.lock().await;
        if self.read(record.id()).await?.is_some() {
            return Ok(false);
        }
        self.write(record).await?;
        Ok(true)
    }

    async fn update(
        &self,
        id: &CapabilityId,
        mutation: ActivityMutation,
    ) -> StorageResult<Option<ActivityRecord>> {
        let _guard = self.write_lock.lock().await;
        let Some(mut record) = self.read(id).await? else {
            return Ok(None);
        };
        if mutation(&mut record) {
            self.write(&record).await?;
        }
        Ok(Some(record))
    }

    async fn remove(&self, id: &CapabilityId) -> StorageResult<bool> {
        let _guard = self.write_lock.lock().await;
        self.backend.delete(ACTIVITY_COLLECTION, id.as_str()).await
    }

    async fn list_all(&self) -> StorageResult<Vec<ActivityRecord>> {
        let records = self.backend.list_all(ACTIVITY_COLLECTION).await?;
        codec::decode_all(ACTIVITY_COLLECTION, records)
    }
}
