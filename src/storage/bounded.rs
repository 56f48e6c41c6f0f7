//! Timeout decorator for key/value backends.

use super::{
    KeyValueBackend, RecordPredicate, StorageError, StorageOperation, StorageResult, StoredRecord,
};
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Wraps a backend so that no call waits longer than a fixed bound.
///
/// Elapsed calls surface as [`StorageError::Timeout`], which is retryable.
/// A call that times out may still have committed on the backend.
#[derive(Debug, Clone)]
pub struct BoundedBackend<B> {
    inner: B,
    timeout: Duration,
}

impl<B: KeyValueBackend> BoundedBackend<B> {
    /// Wraps `inner`, bounding each call by `timeout`.
    #[must_use]
    pub const fn new(inner: B, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Returns the wrapped backend.
    #[must_use]
    pub const fn inner(&self) -> &B {
        &self.inner
    }

    /// Returns the per-call bound.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        collection: &str,
        operation: StorageOperation,
        call: impl Future<Output = StorageResult<T>> + Send,
    ) -> StorageResult<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_elapsed| StorageError::Timeout {
                collection: collection.to_owned(),
                operation,
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            })?
    }
}

#[async_trait]
impl<B: KeyValueBackend> KeyValueBackend for BoundedBackend<B> {
    async fn get(&self, collection: &str, id: &str) -> StorageResult<Option<Value>> {
        self.bounded(
            collection,
            StorageOperation::Get,
            self.inner.get(collection, id),
        )
        .await
    }

    async fn put(&self, collection: &str, id: &str, payload: Value) -> StorageResult<()> {
        self.bounded(
            collection,
            StorageOperation::Put,
            self.inner.put(collection, id, payload),
        )
        .await
    }

    async fn delete(&self, collection: &str, id: &str) -> StorageResult<bool> {
        self.bounded(
            collection,
            StorageOperation::Delete,
            self.inner.delete(collection, id),
        )
        .await
    }

    async fn list_all(&self, collection: &str) -> StorageResult<Vec<StoredRecord>> {
        self.bounded(
            collection,
            StorageOperation::List,
            self.inner.list_all(collection),
        )
        .await
    }

    async fn query(
        &self,
        collection: &str,
        predicate: &RecordPredicate<'_>,
    ) -> StorageResult<Vec<StoredRecord>> {
        self.bounded(
            collection,
            StorageOperation::Query,
            self.inner.query(collection, predicate),
        )
        .await
    }
}
