//! Opaque data blobs kept for providers.

use super::CatalogEntity;
use crate::labels::{LabelAware, Labels};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Named payload stored on behalf of a provider. Names need not be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStoreRecord {
    id: String,
    name: String,
    data: String,
    #[serde(default)]
    labels: Labels,
}

impl DataStoreRecord {
    /// Creates a record with a fresh random id.
    #[must_use]
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            data: data.into(),
            labels: Labels::new(),
        }
    }

    /// Replaces the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Returns the record id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the record name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stored payload.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }
}

impl LabelAware for DataStoreRecord {
    fn labels(&self) -> &Labels {
        &self.labels
    }
}

impl CatalogEntity for DataStoreRecord {
    const COLLECTION: &'static str = "catalog_data_stores";

    fn key(&self) -> &str {
        &self.id
    }

    fn labels_mut(&mut self) -> &mut Labels {
        &mut self.labels
    }
}
