//! Service layer for the capability directory.

mod directory;

pub use directory::{CapabilityDirectory, DirectoryResult, DirectoryServiceError};
