//! Label-aware repository backed by a key/value backend.

use crate::catalog::domain::CatalogEntity;
use crate::catalog::ports::{CatalogError, CatalogResult, LabelAwareRepository};
use crate::labels::{LabelExpression, LabelPredicate, Labels};
use crate::storage::{KeyValueBackend, codec};
use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// [`LabelAwareRepository`] storing entities as JSON in
/// [`CatalogEntity::COLLECTION`].
///
/// Label filters are pushed down to [`KeyValueBackend::query`] as
/// predicates over the stored `labels` object.
#[derive(Debug)]
pub struct KvLabelAwareRepository<B, E> {
    backend: Arc<B>,
    write_lock: Mutex<()>,
    _entity: PhantomData<fn() -> E>,
}

impl<B: KeyValueBackend, E: CatalogEntity> KvLabelAwareRepository<B, E> {
    /// Creates a repository over a shared backend.
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    async fn read(&self, key: &str) -> CatalogResult<Option<E>> {
        let payload = self.backend.get(E::COLLECTION, key).await?;
        Ok(payload
            .map(|value| codec::decode(E::COLLECTION, key, value))
            .transpose()?)
    }

    async fn write(&self, entity: &E) -> CatalogResult<()> {
        let payload = codec::encode(E::COLLECTION, entity.key(), entity)?;
        self.backend.put(E::COLLECTION, entity.key(), payload).await?;
        Ok(())
    }

    async fn edit_labels(
        &self,
        key: &str,
        edit: impl FnOnce(&mut Labels) + Send,
    ) -> CatalogResult<bool> {
        let _guard = self.write_lock.lock().await;
        let Some(mut entity) = self.read(key).await? else {
            return Ok(false);
        };
        edit(entity.labels_mut());
        self.write(&entity).await?;
        Ok(true)
    }
}

/// Reads the `labels` object of a stored payload, skipping non-string
/// values.
fn payload_labels(payload: &Value) -> Labels {
    payload
        .get("labels")
        .and_then(Value::as_object)
        .map(|labels| {
            labels
                .iter()
                .filter_map(|(key, value)| value.as_str().map(|text| (key.clone(), text.to_owned())))
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl<B: KeyValueBackend, E: CatalogEntity> LabelAwareRepository<E> for KvLabelAwareRepository<B, E> {
    async fn save(&self, entity: &E) -> CatalogResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write(entity).await
    }

    async fn find_by_id(&self, key: &str) -> CatalogResult<Option<E>> {
        self.read(key).await
    }

    async fn remove(&self, key: &str) -> CatalogResult<bool> {
        let _guard = self.write_lock.lock().await;
        Ok(self.backend.delete(E::COLLECTION, key).await?)
    }

    async fn list_all(&self) -> CatalogResult<Vec<E>> {
        let records = self.backend.list_all(E::COLLECTION).await?;
        Ok(codec::decode_all(E::COLLECTION, records)?)
    }

    async fn find_all_filter_by_label_expression(&self, expression: &str) -> CatalogResult<Vec<E>> {
        let compiled = LabelExpression::parse(expression)?;
        if compiled.is_match_all() {
            return self.list_all().await;
        }
        let records = self
            .backend
            .query(E::COLLECTION, &|payload: &Value| {
                compiled.evaluate(&payload_labels(payload))
            })
            .await?;
        debug!(
            collection = E::COLLECTION,
            expression = %compiled,
            matches = records.len(),
            "filtered catalog by label expression"
        );
        Ok(codec::decode_all(E::COLLECTION, records)?)
    }

    async fn remove_if(&self, expression: &str) -> CatalogResult<usize> {
        let compiled = LabelExpression::parse(expression)?;
        if compiled.is_match_all() {
            return Err(CatalogError::EmptyRemovalFilter);
        }
        let _guard = self.write_lock.lock().await;
        let entities = self.list_all().await?;
        let doomed = LabelPredicate::<E, _>::for_label_aware(compiled).filter(entities);
        let matched = doomed.len();
        for entity in &doomed {
            self.backend.delete(E::COLLECTION, entity.key()).await?;
        }
        info!(
            collection = E::COLLECTION,
            expression,
            removed = matched,
            "removed catalog entities by label expression"
        );
        Ok(matched)
    }

    async fn add_labels(&self, key: &str, labels: Labels) -> CatalogResult<bool> {
        self.edit_labels(key, move |current| current.extend(labels))
            .await
    }

    async fn remove_labels(&self, key: &str, keys: &[String]) -> CatalogResult<bool> {
        self.edit_labels(key, |current| {
            for label in keys {
                current.remove(label);
            }
        })
        .await
    }
}
