//! Diesel row models for directory record persistence.

use super::schema::directory_records;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for a stored record.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = directory_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DirectoryRecordRow {
    /// Record identifier within the collection.
    pub record_id: String,
    /// Record body.
    pub payload: Value,
}

/// Insert model for a stored record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = directory_records)]
pub struct NewDirectoryRecordRow {
    /// Logical collection name.
    pub collection: String,
    /// Record identifier within the collection.
    pub record_id: String,
    /// Record body.
    pub payload: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
