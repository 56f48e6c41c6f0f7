//! Tool references exposed through the gateway.

use super::CatalogEntity;
use crate::labels::{LabelAware, Labels};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool callers can invoke, keyed by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolReference {
    name: String,
    description: String,
    uri: String,
    tool_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    input_schema: Option<Value>,
    #[serde(default)]
    labels: Labels,
}

impl ToolReference {
    /// Creates a tool handled by the `tool_type` service at `uri`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        uri: impl Into<String>,
        tool_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            uri: uri.into(),
            tool_type: tool_type.into(),
            namespace: None,
            input_schema: None,
            labels: Labels::new(),
        }
    }

    /// Places the tool in a namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Attaches a JSON schema describing the tool arguments.
    #[must_use]
    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }

    /// Replaces the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the invocation URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the name of the service type that executes the tool.
    #[must_use]
    pub fn tool_type(&self) -> &str {
        &self.tool_type
    }

    /// Returns the namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the argument schema, if any.
    #[must_use]
    pub const fn input_schema(&self) -> Option<&Value> {
        self.input_schema.as_ref()
    }
}

impl LabelAware for ToolReference {
    fn labels(&self) -> &Labels {
        &self.labels
    }
}

impl CatalogEntity for ToolReference {
    const COLLECTION: &'static str = "catalog_tools";

    fn key(&self) -> &str {
        &self.name
    }

    fn labels_mut(&mut self) -> &mut Labels {
        &mut self.labels
    }
}
