//! Label-aware catalog entities.

mod data_store;
mod entity;
mod namespace;
mod resource;
mod tool;

pub use data_store::DataStoreRecord;
pub use entity::CatalogEntity;
pub use namespace::Namespace;
pub use resource::ResourceReference;
pub use tool::ToolReference;
