//! Capability store backed by a key/value backend.

use crate::directory::domain::{CapabilityId, ServiceTarget};
use crate::directory::ports::CapabilityStore;
use crate::storage::{KeyValueBackend, StorageResult, codec};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Collection holding serialised [`ServiceTarget`] records.
pub const CAPABILITY_COLLECTION: &str = "capability_targets";

/// [`CapabilityStore`] persisting targets as JSON in
/// [`CAPABILITY_COLLECTION`].
#[derive(Debug)]
pub struct KvCapabilityStore<B> {
    backend: Arc<B>,
    write_lock: Mutex<()>,
}

impl<B: KeyValueBackend> KvCapabilityStore<B> {
    /// Creates a store over a shared backend.
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<B: KeyValueBackend> CapabilityStore for KvCapabilityStore<B> {
    async fn put(&self, target: &ServiceTarget) -> StorageResult<()> {
        let id = target.id().as_str();
        let payload = codec::encode(CAPABILITY_COLLECTION, id, target)?;
        let _guard = self.write_lock.lock().await;
        self.backend.put(CAPABILITY_COLLECTION, id, payload).await
    }

    async fn find_by_id(&self, id: &CapabilityId) -> StorageResult<Option<ServiceTarget>> {
        self.backend
            .get(CAPABILITY_COLLECTION, id.as_str())
            .await?
            .map(|payload| codec::decode(CAPABILITY_COLLECTION, id.as_str(), payload))
            .transpose()
    }

    async fn remove(&self, id: &CapabilityId) -> StorageResult<bool> {
        let _guard = self.write_lock.lock().await;
        self.backend.delete(CAPABILITY_COLLECTION, id.as_str()).await
    }

    async fn list_all(&self) -> StorageResult<Vec<ServiceTarget>> {
        let records = self.backend.list_all(CAPABILITY_COLLECTION).await?;
        codec::decode_all(CAPABILITY_COLLECTION, records)
    }
}
