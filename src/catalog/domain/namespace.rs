//! Namespaces grouping tools and resources.

use super::CatalogEntity;
use crate::labels::{LabelAware, Labels};
use serde::{Deserialize, Serialize};

/// A named grouping with its own path prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    name: String,
    path: String,
    #[serde(default)]
    labels: Labels,
}

impl Namespace {
    /// Creates a namespace.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            labels: Labels::new(),
        }
    }

    /// Replaces the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Returns the namespace name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the path prefix.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl LabelAware for Namespace {
    fn labels(&self) -> &Labels {
        &self.labels
    }
}

impl CatalogEntity for Namespace {
    const COLLECTION: &'static str = "catalog_namespaces";

    fn key(&self) -> &str {
        &self.name
    }

    fn labels_mut(&mut self) -> &mut Labels {
        &mut self.labels
    }
}
