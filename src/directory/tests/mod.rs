//! Unit tests for the capability directory.


use crate::config::DirectoryConfig;
use crate::directory::{
    adapters::{KvActivityStore, KvCapabilityStore},
    domain::{CapabilityId, ServiceTarget, ServiceType},
    services::CapabilityDirectory,
};
use crate::storage::adapters::memory::InMemoryBackend;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex, PoisonError};

/// Clock that only moves when told to.
#[derive(Debug)]
pub(super) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(super) fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(super) fn advance(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += TimeDelta::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(super) type TestDirectory = CapabilityDirectory<
    KvCapabilityStore<InMemoryBackend>,
    KvActivityStore<InMemoryBackend>,
    ManualClock,
>;

/// Directory wired to a fresh in-memory backend, with handles for poking
/// at its internals.
pub(super) struct Harness {
    pub(super) directory: TestDirectory,
    pub(super) clock: Arc<ManualClock>,
    pub(super) backend: Arc<InMemoryBackend>,
}

pub(super) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn harness_with(config: &DirectoryConfig) -> Harness {
    let backend = Arc::new(InMemoryBackend::new());
    let clock = Arc::new(ManualClock::starting_at(epoch()));
    let directory = CapabilityDirectory::new(
        Arc::new(KvCapabilityStore::new(Arc::clone(&backend))),
        Arc::new(KvActivityStore::new(Arc::clone(&backend))),
        Arc::clone(&clock),
        config,
    )
    .expect("valid configuration");
    Harness {
        directory,
        clock,
        backend,
    }
}

pub(super) fn harness() -> Harness {
    harness_with(&DirectoryConfig::default())
}

pub(super) fn id(value: &str) -> CapabilityId {
    CapabilityId::new(value).expect("valid capability id")
}

pub(super) fn target(
    capability: &str,
    service_name: &str,
    service_type: ServiceType,
    port: u16,
) -> ServiceTarget {
    ServiceTarget::new(id(capability), service_name, service_type, "localhost", port)
        .expect("valid target")
}
