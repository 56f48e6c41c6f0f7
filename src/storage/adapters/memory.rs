//! In-memory key/value backend for tests and single-process deployments.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::storage::{
    KeyValueBackend, RecordPredicate, StorageError, StorageOperation, StorageResult, StoredRecord,
};

type Collection = BTreeMap<String, Value>;

/// Thread-safe in-memory backend.
///
/// Collections iterate in id order, so listings are stable. Clones share
/// the same state.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    state: Arc<RwLock<HashMap<String, Collection>>>,
    available: Arc<AtomicBool>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self {
            state: Arc::default(),
            available: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl InMemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the backend going down or coming back.
    ///
    /// While unavailable every call fails with [`StorageError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Returns the number of records in a collection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the state lock is poisoned.
    pub fn len(&self, collection: &str) -> StorageResult<usize> {
        let state = self.state.read().map_err(StorageError::poisoned)?;
        Ok(state.get(collection).map_or(0, BTreeMap::len))
    }

    /// Returns whether a collection holds no records.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if the state lock is poisoned.
    pub fn is_empty(&self, collection: &str) -> StorageResult<bool> {
        Ok(self.len(collection)? == 0)
    }

    fn ensure_available(&self, collection: &str, operation: StorageOperation) -> StorageResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::Unavailable {
                collection: collection.to_owned(),
                operation,
            })
        }
    }

    fn scan(
        &self,
        collection: &str,
        operation: StorageOperation,
        keep: impl Fn(&Value) -> bool,
    ) -> StorageResult<Vec<StoredRecord>> {
        self.ensure_available(collection, operation)?;
        let state = self.state.read().map_err(StorageError::poisoned)?;
        let records = state
            .get(collection)
            .into_iter()
            .flatten()
            .filter(|(_, payload)| keep(payload))
            .map(|(id, payload)| StoredRecord {
                id: id.clone(),
                payload: payload.clone(),
            })
            .collect();
        Ok(records)
    }
}

#[async_trait]
impl KeyValueBackend for InMemoryBackend {
    async fn get(&self, collection: &str, id: &str) -> StorageResult<Option<Value>> {
        self.ensure_available(collection, StorageOperation::Get)?;
        let state = self.state.read().map_err(StorageError::poisoned)?;
        Ok(state
            .get(collection)
            .and_then(|records| records.get(id))
            .cloned())
    }

    async fn put(&self, collection: &str, id: &str, payload: Value) -> StorageResult<()> {
        self.ensure_available(collection, StorageOperation::Put)?;
        let mut state = self.state.write().map_err(StorageError::poisoned)?;
        state
            .entry(collection.to_owned())
            .or_default()
            .insert(id.to_owned(), payload);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StorageResult<bool> {
        self.ensure_available(collection, StorageOperation::Delete)?;
        let mut state = self.state.write().map_err(StorageError::poisoned)?;
        Ok(state
            .get_mut(collection)
            .and_then(|records| records.remove(id))
            .is_some())
    }

    async fn list_all(&self, collection: &str) -> StorageResult<Vec<StoredRecord>> {
        self.scan(collection, StorageOperation::List, |_| true)
    }

    async fn query(
        &self,
        collection: &str,
        predicate: &RecordPredicate<'_>,
    ) -> StorageResult<Vec<StoredRecord>> {
        self.scan(collection, StorageOperation::Query, predicate)
    }
}
