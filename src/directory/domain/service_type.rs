//! Kinds of capability provider.

use super::ParseServiceTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a registered provider plays for the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    /// Executes tools on behalf of callers.
    ToolInvoker,
    /// Serves readable resources.
    ResourceProvider,
    /// Runs submitted code in a given language.
    CodeExecutionEngine,
    /// Acts as both tool invoker and resource provider.
    MultiCapability,
}

impl ServiceType {
    /// Every service type, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::ToolInvoker,
        Self::ResourceProvider,
        Self::CodeExecutionEngine,
        Self::MultiCapability,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToolInvoker => "tool-invoker",
            Self::ResourceProvider => "resource-provider",
            Self::CodeExecutionEngine => "code-execution-engine",
            Self::MultiCapability => "multi-capability",
        }
    }

    /// Returns whether a provider of this type can answer a lookup for
    /// `requested`.
    ///
    /// Multi-capability providers stand in for tool invokers and resource
    /// providers.
    #[must_use]
    pub const fn serves(self, requested: Self) -> bool {
        match (self, requested) {
            (Self::MultiCapability, Self::ToolInvoker | Self::ResourceProvider)
            | (Self::ToolInvoker, Self::ToolInvoker)
            | (Self::ResourceProvider, Self::ResourceProvider)
            | (Self::CodeExecutionEngine, Self::CodeExecutionEngine)
            | (Self::MultiCapability, Self::MultiCapability) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceType {
    type Error = ParseServiceTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == normalized)
            .ok_or_else(|| ParseServiceTypeError(value.to_owned()))
    }
}
