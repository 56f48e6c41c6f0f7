//! JSON encoding of typed records.

use super::{StorageError, StorageResult, StoredRecord};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Serialises one record for storage under `collection`/`id`.
///
/// # Errors
///
/// Returns [`StorageError::Codec`] when serialisation fails.
pub fn encode<T: Serialize>(collection: &str, id: &str, record: &T) -> StorageResult<Value> {
    serde_json::to_value(record).map_err(|err| StorageError::codec(collection, id, err))
}

/// Deserialises one stored payload.
///
/// # Errors
///
/// Returns [`StorageError::Codec`] when the payload does not match `T`.
pub fn decode<T: DeserializeOwned>(collection: &str, id: &str, payload: Value) -> StorageResult<T> {
    serde_json::from_value(payload).map_err(|err| StorageError::codec(collection, id, err))
}

/// Deserialises every record of a listing, failing on the first bad one.
///
/// # Errors
///
/// Returns [`StorageError::Codec`] naming the first undecodable record.
pub fn decode_all<T: DeserializeOwned>(
    collection: &str,
    records: Vec<StoredRecord>,
) -> StorageResult<Vec<T>> {
    records
        .into_iter()
        .map(|record| decode(collection, &record.id, record.payload))
        .collect()
}
