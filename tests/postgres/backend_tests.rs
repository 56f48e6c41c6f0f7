//! Record CRUD, upsert and listing order against a real database.

use super::helpers::{
    CleanupGuard, DROP_RECORDS_SQL, connect, ensure_template, execute_sql_statements,
    setup_backend, test_runtime,
};
use capability_directory::storage::KeyValueBackend;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use serde_json::json;

const MIGRATION_UP_SQL: &str =
    include_str!("../../migrations/2026-01-01-000000_create_directory_records/up.sql");

#[rstest]
fn put_then_get_returns_payload(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_put_get_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let backend = setup_backend(shared_test_cluster, &db_name).expect("backend setup");
    let rt = test_runtime();

    rt.block_on(backend.put("targets", "http-1", json!({"port": 8080})))
        .expect("put");

    let stored = rt
        .block_on(backend.get("targets", "http-1"))
        .expect("get")
        .expect("record exists");
    assert_eq!(stored, json!({"port": 8080}));
}

#[rstest]
fn put_overwrites_existing_record(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_overwrite_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let backend = setup_backend(shared_test_cluster, &db_name).expect("backend setup");
    let rt = test_runtime();

    rt.block_on(backend.put("targets", "http-1", json!({"port": 8080})))
        .expect("first put");
    rt.block_on(backend.put("targets", "http-1", json!({"port": 9090})))
        .expect("second put");

    let stored = rt
        .block_on(backend.get("targets", "http-1"))
        .expect("get")
        .expect("record exists");
    assert_eq!(stored, json!({"port": 9090}));
    let all = rt.block_on(backend.list_all("targets")).expect("list");
    assert_eq!(all.len(), 1);
}

#[rstest]
fn get_returns_none_for_missing_record(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_get_none_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let backend = setup_backend(shared_test_cluster, &db_name).expect("backend setup");
    let rt = test_runtime();

    let stored = rt.block_on(backend.get("targets", "nope")).expect("get");

    assert!(stored.is_none());
}

#[rstest]
fn delete_reports_whether_a_row_was_removed(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_delete_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let backend = setup_backend(shared_test_cluster, &db_name).expect("backend setup");
    let rt = test_runtime();
    rt.block_on(backend.put("targets", "http-1", json!({})))
        .expect("put");

    assert!(rt.block_on(backend.delete("targets", "http-1")).expect("delete"));
    assert!(!rt.block_on(backend.delete("targets", "http-1")).expect("delete again"));
    assert!(
        rt.block_on(backend.get("targets", "http-1"))
            .expect("get")
            .is_none()
    );
}

#[rstest]
fn list_all_orders_by_id_within_one_collection(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_list_order_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let backend = setup_backend(shared_test_cluster, &db_name).expect("backend setup");
    let rt = test_runtime();
    for id in ["charlie", "alpha", "bravo"] {
        rt.block_on(backend.put("targets", id, json!({ "id": id })))
            .expect("put target");
    }
    rt.block_on(backend.put("activity", "alpha", json!({})))
        .expect("put activity");

    let targets = rt.block_on(backend.list_all("targets")).expect("list");

    let ids: Vec<&str> = targets.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, vec!["alpha", "bravo", "charlie"]);
    assert!(
        targets
            .iter()
            .all(|record| record.payload == json!({ "id": record.id }))
    );
    let activity = rt.block_on(backend.list_all("activity")).expect("list");
    assert_eq!(activity.len(), 1);
    assert!(rt.block_on(backend.list_all("empty")).expect("list").is_empty());
}

#[rstest]
fn migration_reverts_and_reapplies_cleanly(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_migration_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let backend = setup_backend(shared_test_cluster, &db_name).expect("backend setup");
    let rt = test_runtime();
    rt.block_on(backend.put("targets", "http-1", json!({})))
        .expect("put");

    let mut conn = connect(shared_test_cluster, &db_name).expect("connect");
    execute_sql_statements(&mut conn, DROP_RECORDS_SQL).expect("down migration");
    execute_sql_statements(&mut conn, MIGRATION_UP_SQL).expect("up migration");

    assert!(rt.block_on(backend.list_all("targets")).expect("list").is_empty());
}

#[rstest]
fn schema_indexes_only_the_record_key(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_indexes_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    setup_backend(shared_test_cluster, &db_name).expect("backend setup");
    let mut conn = connect(shared_test_cluster, &db_name).expect("connect");

    let indexes: Vec<String> = diesel::select(sql::<Text>(
        "indexname FROM pg_indexes WHERE tablename = 'directory_records'",
    ))
    .load(&mut conn)
    .expect("list indexes");
    let key_columns: i64 = diesel::select(sql::<BigInt>(
        "COUNT(*) FROM information_schema.key_column_usage \
         WHERE table_name = 'directory_records'",
    ))
    .get_result(&mut conn)
    .expect("count key columns");

    assert_eq!(indexes, vec!["directory_records_pkey".to_owned()]);
    assert_eq!(key_columns, 2);
}
