//! Resource references exposed through the gateway.

use super::CatalogEntity;
use crate::labels::{LabelAware, Labels};
use serde::{Deserialize, Serialize};

/// A readable resource, keyed by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    name: String,
    location: String,
    resource_type: String,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(default)]
    labels: Labels,
}

impl ResourceReference {
    /// Creates a resource served by the `resource_type` provider.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            resource_type: resource_type.into(),
            description: String::new(),
            mime_type: None,
            namespace: None,
            labels: Labels::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Places the resource in a namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Replaces the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns where the provider finds the resource.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the provider type.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the MIME type, if known.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Returns the namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl LabelAware for ResourceReference {
    fn labels(&self) -> &Labels {
        &self.labels
    }
}

impl CatalogEntity for ResourceReference {
    const COLLECTION: &'static str = "catalog_resources";

    fn key(&self) -> &str {
        &self.name
    }

    fn labels_mut(&mut self) -> &mut Labels {
        &mut self.labels
    }
}
