//! Capability directory service.

use crate::config::{ConfigError, DirectoryConfig};
use crate::directory::adapters::{KvActivityStore, KvCapabilityStore};
use crate::directory::domain::{
    ActivityRecord, CapabilityId, DirectoryDomainError, DirectoryEvent, FleetStatus,
    ServiceState, ServiceTarget, ServiceType, StaleCapability, StalenessQuery,
};
use crate::directory::ports::{ActivityStore, CapabilityStore};
use crate::storage::{BoundedBackend, KeyValueBackend, StorageError};
use mockable::Clock;
use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

/// Service-level errors for directory operations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),
    /// A store operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DirectoryServiceError {
    /// Returns whether the caller may retry the operation unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Domain(_) => false,
            Self::Storage(err) => err.is_retryable(),
        }
    }
}

/// Result type for directory service operations.
pub type DirectoryResult<T> = Result<T, DirectoryServiceError>;

/// Registry of capability providers and their liveness.
///
/// Owns its two stores; construct once at start-up and share behind an
/// [`Arc`]. Not-found conditions are reported through `Option` and `bool`
/// returns. Dropping a returned future cancels the call; writes that already
/// reached the backend stay, and every operation can be retried safely.
pub struct CapabilityDirectory<S, A, C>
where
    S: CapabilityStore,
    A: ActivityStore,
    C: Clock + Send + Sync,
{
    capabilities: Arc<S>,
    activity: Arc<A>,
    clock: Arc<C>,
    max_state_count: NonZeroUsize,
    default_stale_max_age_seconds: i64,
    events: broadcast::Sender<DirectoryEvent>,
    missed_pings: AtomicU64,
}

impl<B, C>
    CapabilityDirectory<KvCapabilityStore<BoundedBackend<B>>, KvActivityStore<BoundedBackend<B>>, C>
where
    B: KeyValueBackend,
    C: Clock + Send + Sync,
{
    /// Creates a directory whose stores share `backend`, with every call
    /// capped at the configured `backend_timeout_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn over_backend(
        backend: B,
        clock: Arc<C>,
        config: &DirectoryConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounded = Arc::new(BoundedBackend::new(backend, config.backend_timeout()));
        Self::new(
            Arc::new(KvCapabilityStore::new(Arc::clone(&bounded))),
            Arc::new(KvActivityStore::new(bounded)),
            clock,
            config,
        )
    }
}

impl<S, A, C> CapabilityDirectory<S, A, C>
where
    S: CapabilityStore,
    A: ActivityStore,
    C: Clock + Send + Sync,
{
    /// Creates a directory over the given stores.
    ///
    /// The stores are used as given; wrap their backend in a
    /// [`BoundedBackend`] to cap each call at `backend_timeout_ms`, or use
    /// [`CapabilityDirectory::over_backend`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(
        capabilities: Arc<S>,
        activity: Arc<A>,
        clock: Arc<C>,
        config: &DirectoryConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let (events, _) = broadcast::channel(config.event_buffer);
        Ok(Self {
            capabilities,
            activity,
            clock,
            max_state_count: config.history_bound()?,
            default_stale_max_age_seconds: config.default_stale_max_age_seconds,
            events,
            missed_pings: AtomicU64::new(0),
        })
    }

    /// Subscribes to registration changes made after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DirectoryEvent> {
        self.events.subscribe()
    }

    /// Returns how many pings or state updates named an unknown id.
    #[must_use]
    pub fn missed_ping_count(&self) -> u64 {
        self.missed_pings.load(Ordering::Relaxed)
    }

    /// Returns the configured history bound.
    #[must_use]
    pub const fn max_state_count(&self) -> NonZeroUsize {
        self.max_state_count
    }

    /// Builds a staleness query using the configured default age.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::NegativeMaxAge`] if the configured
    /// age is negative.
    pub const fn default_staleness_query(
        &self,
        inactive_only: bool,
    ) -> Result<StalenessQuery, DirectoryDomainError> {
        StalenessQuery::new(self.default_stale_max_age_seconds, inactive_only)
    }

    /// Registers `target`, replacing any target with the same id.
    ///
    /// Creates an empty activity record when none exists; an existing one
    /// keeps its liveness and history.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when a store fails.
    pub async fn register(&self, target: ServiceTarget) -> DirectoryResult<ServiceTarget> {
        self.capabilities.put(&target).await?;
        let created = self
            .activity
            .insert_if_absent(&ActivityRecord::new(target.id().clone()))
            .await?;
        info!(
            capability_id = %target.id(),
            service_name = target.service_name(),
            service_type = %target.service_type(),
            address = %target.address(),
            new_activity_record = created,
            "capability registered"
        );
        self.publish(DirectoryEvent::Registered(target.clone()));
        Ok(target)
    }

    /// Removes `target` and marks its activity record inactive.
    ///
    /// The activity record is updated only if it exists. Subscribers hear
    /// of the deregistration only when the target or its record existed.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when a store fails.
    pub async fn deregister(&self, target: &ServiceTarget) -> DirectoryResult<()> {
        let id = target.id();
        let removed = self.capabilities.remove(id).await?;
        let now = self.clock.utc();
        let max_states = self.max_state_count;
        let mutation_id = id.clone();
        let updated = self
            .activity
            .update(
                id,
                Box::new(move |record: &mut ActivityRecord| {
                    let evicted = record.record_deregistration(now, max_states);
                    log_eviction(&mutation_id, evicted);
                    true
                }),
            )
            .await?;
        info!(
            capability_id = %id,
            service_name = target.service_name(),
            target_removed = removed,
            activity_updated = updated.is_some(),
            "capability deregistered"
        );
        if removed || updated.is_some() {
            self.publish(DirectoryEvent::Deregistered(target.clone()));
        }
        Ok(())
    }

    /// Marks `id` live as of now.
    ///
    /// Returns `false` when no activity record exists for `id`; such pings
    /// are logged and counted.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when the store fails.
    pub async fn ping(&self, id: &CapabilityId) -> DirectoryResult<bool> {
        let now = self.clock.utc();
        let updated = self
            .activity
            .update(
                id,
                Box::new(move |record: &mut ActivityRecord| {
                    record.record_ping(now);
                    true
                }),
            )
            .await?;
        if updated.is_none() {
            self.record_miss(id, "ping");
            return Ok(false);
        }
        trace!(capability_id = %id, "ping recorded");
        Ok(true)
    }

    /// Appends `state` to the history of `id`, evicting old entries as
    /// needed.
    ///
    /// Returns `false` when no activity record exists for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when the store fails.
    pub async fn update_last_state(
        &self,
        id: &CapabilityId,
        state: ServiceState,
    ) -> DirectoryResult<bool> {
        let max_states = self.max_state_count;
        let mutation_id = id.clone();
        let updated = self
            .activity
            .update(
                id,
                Box::new(move |record: &mut ActivityRecord| {
                    let evicted = record.push_state(state, max_states);
                    log_eviction(&mutation_id, evicted);
                    true
                }),
            )
            .await?;
        if updated.is_none() {
            self.record_miss(id, "state update");
            return Ok(false);
        }
        Ok(true)
    }

    /// Returns the activity record of `id`.
    ///
    /// A record with no history gets a single missing-in-action entry,
    /// persisted, the first time it is read.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when the store fails.
    pub async fn get_states(&self, id: &CapabilityId) -> DirectoryResult<Option<ActivityRecord>> {
        let now = self.clock.utc();
        let mutation_id = id.clone();
        let record = self
            .activity
            .update(
                id,
                Box::new(move |record: &mut ActivityRecord| {
                    let added = record.backfill_missing_in_action(now);
                    if added {
                        debug!(capability_id = %mutation_id, "backfilled missing-in-action state");
                    }
                    added
                }),
            )
            .await?;
        Ok(record)
    }

    /// Deletes `id` from both stores independently.
    ///
    /// Returns `true` when either store held a record, so orphaned halves
    /// are cleaned up too.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when a store fails.
    pub async fn remove_by_id(&self, id: &CapabilityId) -> DirectoryResult<bool> {
        let target_removed = self.capabilities.remove(id).await?;
        let activity_removed = self.activity.remove(id).await?;
        let removed = target_removed || activity_removed;
        if removed {
            info!(
                capability_id = %id,
                target_removed,
                activity_removed,
                "capability removed"
            );
            self.publish(DirectoryEvent::Removed(id.clone()));
        }
        Ok(removed)
    }

    /// Finds a registered target by id.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when the store fails.
    pub async fn find_by_id(&self, id: &CapabilityId) -> DirectoryResult<Option<ServiceTarget>> {
        Ok(self.capabilities.find_by_id(id).await?)
    }

    /// Returns every registered target.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when the store fails.
    pub async fn list_all(&self) -> DirectoryResult<Vec<ServiceTarget>> {
        Ok(self.capabilities.list_all().await?)
    }

    /// Returns targets able to serve `service_type`.
    ///
    /// Multi-capability providers are included for tool-invoker and
    /// resource-provider lookups.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when the store fails.
    pub async fn list_capable(&self, service_type: ServiceType) -> DirectoryResult<Vec<ServiceTarget>> {
        let targets = self.capabilities.list_all().await?;
        let capable: Vec<_> = targets
            .into_iter()
            .filter(|target| target.service_type().serves(service_type))
            .collect();
        debug!(service_type = %service_type, count = capable.len(), "listed capable targets");
        Ok(capable)
    }

    /// Returns targets named `service_name` able to serve `service_type`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when the store fails.
    pub async fn get_by_service_name_and_type(
        &self,
        service_name: &str,
        service_type: ServiceType,
    ) -> DirectoryResult<Vec<ServiceTarget>> {
        let capable = self.list_capable(service_type).await?;
        Ok(capable
            .into_iter()
            .filter(|target| target.service_name() == service_name)
            .collect())
    }

    /// Picks the provider that should execute tool `service_name`.
    ///
    /// Prefers an active tool invoker, then any tool invoker, then a
    /// code-execution engine of the same name, active first.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when a store fails.
    pub async fn resolve_tool_host(&self, service_name: &str) -> DirectoryResult<Option<ServiceTarget>> {
        for service_type in [ServiceType::ToolInvoker, ServiceType::CodeExecutionEngine] {
            let candidates = self
                .get_by_service_name_and_type(service_name, service_type)
                .await?;
            if let Some(chosen) = self.prefer_active(candidates).await? {
                debug!(
                    service_name,
                    capability_id = %chosen.id(),
                    service_type = %chosen.service_type(),
                    "resolved tool host"
                );
                return Ok(Some(chosen));
            }
        }
        debug!(service_name, "no tool host available");
        Ok(None)
    }

    /// Returns code-execution engines matching the optional sub-type and
    /// language filters.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when the store fails.
    pub async fn find_code_execution_engines(
        &self,
        sub_type: Option<&str>,
        language: Option<&str>,
    ) -> DirectoryResult<Vec<ServiceTarget>> {
        let engines = self.list_capable(ServiceType::CodeExecutionEngine).await?;
        Ok(engines
            .into_iter()
            .filter(|engine| sub_type.is_none_or(|wanted| engine.service_sub_type() == Some(wanted)))
            .filter(|engine| language.is_none_or(|wanted| engine.language_name() == Some(wanted)))
            .collect())
    }

    /// Returns activity records of providers serving `service_type`,
    /// grouped by service name.
    ///
    /// Providers without an activity record are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when a store fails.
    pub async fn states_by_service(
        &self,
        service_type: ServiceType,
    ) -> DirectoryResult<BTreeMap<String, Vec<ActivityRecord>>> {
        let targets = self.list_capable(service_type).await?;
        let mut activity = self.activity_index().await?;
        let mut grouped: BTreeMap<String, Vec<ActivityRecord>> = BTreeMap::new();
        for target in targets {
            if let Some(record) = activity.remove(target.id()) {
                grouped
                    .entry(target.service_name().to_owned())
                    .or_default()
                    .push(record);
            }
        }
        Ok(grouped)
    }

    /// Returns registered targets that the query considers stale.
    ///
    /// Targets without an activity record are always included. Order
    /// follows the capability store.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when a store fails.
    pub async fn find_stale_capabilities(
        &self,
        query: StalenessQuery,
    ) -> DirectoryResult<Vec<StaleCapability>> {
        let now = self.clock.utc();
        let targets = self.capabilities.list_all().await?;
        let mut activity = self.activity_index().await?;
        let stale: Vec<_> = targets
            .into_iter()
            .filter_map(|target| {
                let record = activity.remove(target.id());
                query.is_stale(record.as_ref(), now).then_some(StaleCapability {
                    target,
                    activity: record,
                })
            })
            .collect();
        debug!(
            max_age_seconds = query.max_age_seconds(),
            inactive_only = query.inactive_only(),
            count = stale.len(),
            "evaluated stale capabilities"
        );
        Ok(stale)
    }

    /// Removes every capability the query considers stale.
    ///
    /// Returns how many were removed. A capability that disappears between
    /// the query and its removal is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when a store fails;
    /// removals already made are kept.
    pub async fn cleanup_stale(&self, query: StalenessQuery) -> DirectoryResult<usize> {
        let stale = self.find_stale_capabilities(query).await?;
        let mut removed = 0_usize;
        for candidate in &stale {
            if self.remove_by_id(candidate.target.id()).await? {
                removed = removed.saturating_add(1);
            }
        }
        info!(
            max_age_seconds = query.max_age_seconds(),
            inactive_only = query.inactive_only(),
            candidates = stale.len(),
            removed,
            "stale capability cleanup finished"
        );
        Ok(removed)
    }

    /// Summarises liveness across all registered capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Storage`] when a store fails.
    pub async fn fleet_status(&self) -> DirectoryResult<FleetStatus> {
        let targets = self.capabilities.list_all().await?;
        let activity = self.activity_index().await?;
        let mut status = FleetStatus::default();
        for target in &targets {
            status.record(target, activity.get(target.id()));
        }
        Ok(status)
    }

    async fn activity_index(&self) -> DirectoryResult<HashMap<CapabilityId, ActivityRecord>> {
        let records = self.activity.list_all().await?;
        Ok(records
            .into_iter()
            .map(|record| (record.id().clone(), record))
            .collect())
    }

    async fn prefer_active(
        &self,
        candidates: Vec<ServiceTarget>,
    ) -> DirectoryResult<Option<ServiceTarget>> {
        let mut fallback = None;
        for candidate in candidates {
            let active = self
                .activity
                .find_by_id(candidate.id())
                .await?
                .is_some_and(|record| record.is_active());
            if active {
                return Ok(Some(candidate));
            }
            if fallback.is_none() {
                fallback = Some(candidate);
            }
        }
        Ok(fallback)
    }

    fn record_miss(&self, id: &CapabilityId, operation: &'static str) {
        let total = self
            .missed_pings
            .fetch_add(1, Ordering::Relaxed)
            .saturating_add(1);
        warn!(
            capability_id = %id,
            operation,
            missed_total = total,
            "no activity record for capability; was it registered?"
        );
    }

    fn publish(&self, event: DirectoryEvent) {
        if let Err(unsent) = self.events.send(event) {
            trace!(capability_id = %unsent.0.capability_id(), "no directory event subscribers");
        }
    }
}

fn log_eviction(id: &CapabilityId, evicted: usize) {
    if evicted > 0 {
        debug!(capability_id = %id, evicted, "evicted oldest service states");
    }
}
