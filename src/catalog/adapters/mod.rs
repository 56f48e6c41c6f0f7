//! Repository implementations over a [`KeyValueBackend`](crate::storage::KeyValueBackend).

mod kv_repository;

pub use kv_repository::KvLabelAwareRepository;
