//! Shared world state for capability liveness BDD scenarios.

use std::sync::Arc;

use crate::clock::ManualClock;
use capability_directory::config::DirectoryConfig;
use capability_directory::directory::{
    adapters::{KvActivityStore, KvCapabilityStore},
    domain::CapabilityId,
    services::CapabilityDirectory,
};
use capability_directory::storage::adapters::memory::InMemoryBackend;
use rstest::fixture;

/// Directory type used by the BDD world.
pub type TestDirectory = CapabilityDirectory<
    KvCapabilityStore<InMemoryBackend>,
    KvActivityStore<InMemoryBackend>,
    ManualClock,
>;

/// Scenario world for capability liveness behaviour tests.
pub struct LivenessWorld {
    /// The directory under test.
    pub directory: TestDirectory,
    /// Clock driving the directory.
    pub clock: Arc<ManualClock>,
    /// Result of the last ping.
    pub last_ping: Option<bool>,
}

impl LivenessWorld {
    /// Creates a world with an empty directory and default configuration.
    pub fn new() -> eyre::Result<Self> {
        let backend = Arc::new(InMemoryBackend::new());
        let clock = Arc::new(ManualClock::new());
        let directory = CapabilityDirectory::new(
            Arc::new(KvCapabilityStore::new(Arc::clone(&backend))),
            Arc::new(KvActivityStore::new(backend)),
            Arc::clone(&clock),
            &DirectoryConfig::default(),
        )?;
        Ok(Self {
            directory,
            clock,
            last_ping: None,
        })
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LivenessWorld {
    match LivenessWorld::new() {
        Ok(world) => world,
        Err(err) => panic!("default directory configuration rejected: {err}"),
    }
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a capability id named in a scenario.
pub fn capability_id(raw: &str) -> eyre::Result<CapabilityId> {
    CapabilityId::new(raw).map_err(|err| eyre::eyre!("invalid capability id '{raw}': {err}"))
}
