//! Capability identifiers.

use super::DirectoryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum identifier length accepted by persistent backends.
pub const MAX_CAPABILITY_ID_LENGTH: usize = 255;

/// Opaque, stable identifier of a registered capability.
///
/// Providers supply their own id, typically generated once at first boot
/// with [`CapabilityId::generate`] and persisted locally, so restarts
/// re-register in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CapabilityId(String);

impl CapabilityId {
    /// Validates and wraps a caller-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyCapabilityId`] for blank input
    /// and [`DirectoryDomainError::CapabilityIdTooLong`] past
    /// [`MAX_CAPABILITY_ID_LENGTH`] bytes.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(DirectoryDomainError::EmptyCapabilityId);
        }
        if raw.len() > MAX_CAPABILITY_ID_LENGTH {
            return Err(DirectoryDomainError::CapabilityIdTooLong(raw));
        }
        Ok(Self(raw))
    }

    /// Creates a random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CapabilityId {
    type Error = DirectoryDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CapabilityId {
    type Error = DirectoryDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CapabilityId> for String {
    fn from(id: CapabilityId) -> Self {
        id.0
    }
}

impl AsRef<str> for CapabilityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
