//! Repository port for label-aware catalog entities.

use crate::catalog::domain::CatalogEntity;
use crate::labels::{LabelExpressionParseError, Labels};
use crate::storage::StorageError;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors returned by catalog repositories.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The filter expression is malformed.
    #[error(transparent)]
    InvalidLabelExpression(#[from] LabelExpressionParseError),

    /// A bulk removal was requested without a filter.
    #[error("refusing to remove entities without a label expression")]
    EmptyRemovalFilter,

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CatalogError {
    /// Returns whether the caller may retry the operation unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Storage(err) => err.is_retryable(),
            Self::InvalidLabelExpression(_) | Self::EmptyRemovalFilter => false,
        }
    }
}

/// Persistence and label filtering for one kind of catalog entity.
#[async_trait]
pub trait LabelAwareRepository<E: CatalogEntity>: Send + Sync {
    /// Inserts or replaces an entity under its key.
    async fn save(&self, entity: &E) -> CatalogResult<()>;

    /// Finds an entity by key. Returns `None` when absent.
    async fn find_by_id(&self, key: &str) -> CatalogResult<Option<E>>;

    /// Deletes an entity. Returns whether one was removed.
    async fn remove(&self, key: &str) -> CatalogResult<bool>;

    /// Returns every entity in stable backend order.
    async fn list_all(&self) -> CatalogResult<Vec<E>>;

    /// Returns the entities whose labels satisfy `expression`.
    ///
    /// A blank expression returns every entity.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidLabelExpression`] for malformed input,
    /// distinct from an empty result.
    async fn find_all_filter_by_label_expression(&self, expression: &str) -> CatalogResult<Vec<E>>;

    /// Deletes the entities whose labels satisfy `expression` and returns
    /// how many matched.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyRemovalFilter`] for a blank expression
    /// and [`CatalogError::InvalidLabelExpression`] for malformed input.
    async fn remove_if(&self, expression: &str) -> CatalogResult<usize>;

    /// Merges `labels` into the entity under `key`, overwriting existing
    /// values. Returns `false` when no such entity exists.
    async fn add_labels(&self, key: &str, labels: Labels) -> CatalogResult<bool>;

    /// Drops `keys` from the labels of the entity under `key`. Returns
    /// `false` when no such entity exists.
    async fn remove_labels(&self, key: &str, keys: &[String]) -> CatalogResult<bool>;
}
