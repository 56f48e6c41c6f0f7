//! Error types for capability directory domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing directory domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The capability identifier is empty after trimming.
    #[error("capability id must not be empty")]
    EmptyCapabilityId,

    /// The capability identifier exceeds the storage limit.
    #[error("capability id exceeds 255 byte limit: {0}")]
    CapabilityIdTooLong(String),

    /// The service name is empty after trimming.
    #[error("service name must not be empty")]
    EmptyServiceName,

    /// The host is empty after trimming.
    #[error("host must not be empty")]
    EmptyHost,

    /// A staleness query was given a negative age.
    #[error("max age must not be negative: {0} seconds")]
    NegativeMaxAge(i64),
}

/// Error returned while parsing a service type name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown service type: {0}")]
pub struct ParseServiceTypeError(pub String);
