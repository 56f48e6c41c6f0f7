//! Directory lifecycle over a bounded `PostgreSQL` backend.

use super::helpers::{CleanupGuard, ensure_template, setup_backend, test_runtime};
use crate::clock::ManualClock;
use capability_directory::config::DirectoryConfig;
use capability_directory::directory::domain::{
    CapabilityId, ServiceHealth, ServiceState, ServiceTarget, ServiceType, StalenessQuery,
};
use capability_directory::directory::services::CapabilityDirectory;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use std::sync::Arc;

fn provider(capability: &str) -> ServiceTarget {
    let id = CapabilityId::new(capability).expect("valid capability id");
    ServiceTarget::new(id, "http", ServiceType::ToolInvoker, "10.0.0.7", 8080)
        .expect("valid target")
}

#[rstest]
fn provider_lifecycle_persists_until_cleanup(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_directory_flow_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let backend = setup_backend(shared_test_cluster, &db_name).expect("backend setup");
    let clock = Arc::new(ManualClock::new());
    let directory = CapabilityDirectory::over_backend(
        backend,
        Arc::clone(&clock),
        &DirectoryConfig::default().with_max_state_count(4),
    )
    .expect("valid configuration");
    let invoker = provider("http-1");
    let idle = provider("http-idle");
    let rt = test_runtime();

    rt.block_on(async {
        directory.register(invoker.clone()).await.expect("register");
        directory.register(idle.clone()).await.expect("register idle");
        assert!(directory.ping(invoker.id()).await.expect("ping"));

        directory.deregister(&invoker).await.expect("deregister");
        assert!(directory.find_by_id(invoker.id()).await.expect("find").is_none());
        let record = directory
            .get_states(invoker.id())
            .await
            .expect("states")
            .expect("record survives deregistration");
        assert_eq!(
            record.last_state().map(ServiceState::health),
            Some(ServiceHealth::Inactive)
        );

        directory.register(invoker.clone()).await.expect("re-register");
        clock.advance(600);
        let query = StalenessQuery::new(300, true).expect("valid query");
        assert_eq!(directory.cleanup_stale(query).await.expect("cleanup"), 2);

        assert!(directory.list_all().await.expect("list").is_empty());
        assert!(directory.get_states(invoker.id()).await.expect("states").is_none());
        assert!(directory.get_states(idle.id()).await.expect("states").is_none());
    });
}

#[rstest]
fn re_registration_keeps_activity_history(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_directory_history_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let backend = setup_backend(shared_test_cluster, &db_name).expect("backend setup");
    let clock = Arc::new(ManualClock::new());
    let directory =
        CapabilityDirectory::over_backend(backend, Arc::clone(&clock), &DirectoryConfig::default())
            .expect("valid configuration");
    let invoker = provider("http-1");
    let rt = test_runtime();

    rt.block_on(async {
        directory.register(invoker.clone()).await.expect("register");
        clock.advance(5);
        assert!(directory.ping(invoker.id()).await.expect("ping"));
        directory.register(invoker.clone()).await.expect("re-register");

        let record = directory
            .get_states(invoker.id())
            .await
            .expect("states")
            .expect("record exists");
        assert!(record.is_active());
        assert!(record.last_seen().is_some());
        assert_eq!(directory.list_all().await.expect("list").len(), 1);
    });
}
