//! Port contracts for catalog persistence.

mod repository;

pub use repository::{CatalogError, CatalogResult, LabelAwareRepository};
