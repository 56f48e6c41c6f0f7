//! Diesel schema for directory record persistence.

diesel::table! {
    /// Serialised records of every directory collection.
    directory_records (collection, record_id) {
        /// Logical collection name.
        #[max_length = 100]
        collection -> Varchar,
        /// Record identifier within the collection.
        #[max_length = 255]
        record_id -> Varchar,
        /// Record body as JSONB.
        payload -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
