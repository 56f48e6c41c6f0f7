//! Registered capability identity and address.

use super::{CapabilityId, DirectoryDomainError, ServiceType};
use serde::{Deserialize, Serialize};

/// Identity and network address of a registered capability provider.
///
/// Re-registering a target with the same id replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTarget {
    id: CapabilityId,
    service_name: String,
    service_type: ServiceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language_name: Option<String>,
    host: String,
    port: u16,
}

impl ServiceTarget {
    /// Creates a target after validating its name and host.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyServiceName`] or
    /// [`DirectoryDomainError::EmptyHost`] for blank values.
    pub fn new(
        id: CapabilityId,
        service_name: impl Into<String>,
        service_type: ServiceType,
        host: impl Into<String>,
        port: u16,
    ) -> Result<Self, DirectoryDomainError> {
        let name = service_name.into().trim().to_owned();
        if name.is_empty() {
            return Err(DirectoryDomainError::EmptyServiceName);
        }
        let address = host.into().trim().to_owned();
        if address.is_empty() {
            return Err(DirectoryDomainError::EmptyHost);
        }
        Ok(Self {
            id,
            service_name: name,
            service_type,
            service_sub_type: None,
            language_name: None,
            host: address,
            port,
        })
    }

    /// Sets the engine sub-type, e.g. `jvm` or `interpreted`.
    #[must_use]
    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.service_sub_type = Some(sub_type.into());
        self
    }

    /// Sets the language a code-execution engine runs.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language_name = Some(language.into());
        self
    }

    /// Returns the capability identifier.
    #[must_use]
    pub const fn id(&self) -> &CapabilityId {
        &self.id
    }

    /// Returns the logical service name.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns the provider role.
    #[must_use]
    pub const fn service_type(&self) -> ServiceType {
        self.service_type
    }

    /// Returns the engine sub-type, if any.
    #[must_use]
    pub fn service_sub_type(&self) -> Option<&str> {
        self.service_sub_type.as_deref()
    }

    /// Returns the engine language, if any.
    #[must_use]
    pub fn language_name(&self) -> Option<&str> {
        self.language_name.as_deref()
    }

    /// Returns the host name or address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the TCP port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns `host:port`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
