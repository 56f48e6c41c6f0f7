//! Key/value backend port.

use super::StorageResult;
use async_trait::async_trait;
use serde_json::Value;

/// A record as held by a backend: its identifier and JSON payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Record identifier, unique within its collection.
    pub id: String,
    /// Serialised record body.
    pub payload: Value,
}

/// Filter applied to raw record payloads by [`KeyValueBackend::query`].
pub type RecordPredicate<'a> = dyn Fn(&Value) -> bool + Send + Sync + 'a;

/// Storage-agnostic key/value contract.
///
/// Records are grouped into named collections and addressed by string id.
/// Iteration order of [`list_all`](Self::list_all) must be stable for an
/// unchanged collection.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Fetches one record. Returns `None` when the id is not present.
    async fn get(&self, collection: &str, id: &str) -> StorageResult<Option<Value>>;

    /// Inserts or fully replaces one record.
    async fn put(&self, collection: &str, id: &str, payload: Value) -> StorageResult<()>;

    /// Removes one record. Returns whether a record was removed.
    async fn delete(&self, collection: &str, id: &str) -> StorageResult<bool>;

    /// Returns every record in a collection.
    async fn list_all(&self, collection: &str) -> StorageResult<Vec<StoredRecord>>;

    /// Returns the records whose payload satisfies `predicate`.
    ///
    /// Backends that cannot push filtering down keep this default, which
    /// scans the collection and filters client-side.
    async fn query(
        &self,
        collection: &str,
        predicate: &RecordPredicate<'_>,
    ) -> StorageResult<Vec<StoredRecord>> {
        let records = self.list_all(collection).await?;
        Ok(records
            .into_iter()
            .filter(|record| predicate(&record.payload))
            .collect())
    }
}
