//! `PostgreSQL` key/value backend.
//!
//! All collections share one `directory_records` table keyed by
//! `(collection, record_id)` with a JSONB payload.

mod backend;
mod models;
mod schema;

pub use backend::{DirectoryPgPool, PostgresBackend};
