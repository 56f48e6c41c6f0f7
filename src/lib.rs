//! Capability directory for an MCP gateway.
//!
//! Tracks which capability providers (tool invokers, resource providers,
//! code execution engines) are registered, whether they are alive, and which
//! have gone stale. A label expression engine filters the gateway catalog
//! by `key=value` labels.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Implementations of ports over a [`storage`] backend
//!
//! # Modules
//!
//! - [`labels`]: Label expression parsing and evaluation
//! - [`storage`]: Key/value backends (in-memory and `PostgreSQL`)
//! - [`directory`]: Registration, liveness and staleness of providers
//! - [`catalog`]: Label-aware tool, resource and namespace repositories
//! - [`config`]: Directory tunables from defaults and the environment

pub mod catalog;
pub mod config;
pub mod directory;
pub mod labels;
pub mod storage;
