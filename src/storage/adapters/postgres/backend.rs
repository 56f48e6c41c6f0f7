//! `PostgreSQL` implementation of the key/value backend.

use super::{
    models::{DirectoryRecordRow, NewDirectoryRecordRow},
    schema::directory_records,
};
use crate::storage::{
    KeyValueBackend, StorageError, StorageOperation, StorageResult, StoredRecord,
};
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use serde_json::Value;

/// `PostgreSQL` connection pool type used by the directory backend.
pub type DirectoryPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed key/value backend.
///
/// Filtering in [`KeyValueBackend::query`] stays client-side because the
/// predicate is an arbitrary closure.
#[derive(Debug, Clone)]
pub struct PostgresBackend {
    pool: DirectoryPgPool,
}

impl PostgresBackend {
    /// Creates a backend from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DirectoryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(
        &self,
        collection: &str,
        operation: StorageOperation,
        f: F,
    ) -> StorageResult<T>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, diesel::result::Error> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        let owned_collection = collection.to_owned();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(|_| StorageError::Unavailable {
                collection: owned_collection,
                operation,
            })?;
            f(&mut connection).map_err(StorageError::backend)
        })
        .await
        .map_err(StorageError::backend)?
    }
}

#[async_trait]
impl KeyValueBackend for PostgresBackend {
    async fn get(&self, collection: &str, id: &str) -> StorageResult<Option<Value>> {
        let collection_key = collection.to_owned();
        let record_key = id.to_owned();
        self.run_blocking(collection, StorageOperation::Get, move |connection| {
            directory_records::table
                .filter(directory_records::collection.eq(&collection_key))
                .filter(directory_records::record_id.eq(&record_key))
                .select(directory_records::payload)
                .first::<Value>(connection)
                .optional()
        })
        .await
    }

    async fn put(&self, collection: &str, id: &str, payload: Value) -> StorageResult<()> {
        let now = Utc::now();
        let row = NewDirectoryRecordRow {
            collection: collection.to_owned(),
            record_id: id.to_owned(),
            payload,
            created_at: now,
            updated_at: now,
        };
        self.run_blocking(collection, StorageOperation::Put, move |connection| {
            diesel::insert_into(directory_records::table)
                .values(&row)
                .on_conflict((directory_records::collection, directory_records::record_id))
                .do_update()
                .set((
                    directory_records::payload.eq(&row.payload),
                    directory_records::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map(|_| ())
        })
        .await
    }

    async fn delete(&self, collection: &str, id: &str) -> StorageResult<bool> {
        let collection_key = collection.to_owned();
        let record_key = id.to_owned();
        self.run_blocking(collection, StorageOperation::Delete, move |connection| {
            diesel::delete(
                directory_records::table
                    .filter(directory_records::collection.eq(&collection_key))
                    .filter(directory_records::record_id.eq(&record_key)),
            )
            .execute(connection)
            .map(|deleted| deleted > 0)
        })
        .await
    }

    async fn list_all(&self, collection: &str) -> StorageResult<Vec<StoredRecord>> {
        let collection_key = collection.to_owned();
        let rows = self
            .run_blocking(collection, StorageOperation::List, move |connection| {
                directory_records::table
                    .filter(directory_records::collection.eq(&collection_key))
                    .order(directory_records::record_id.asc())
                    .select(DirectoryRecordRow::as_select())
                    .load::<DirectoryRecordRow>(connection)
            })
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| StoredRecord {
                id: row.record_id,
                payload: row.payload,
            })
            .collect())
    }
}
