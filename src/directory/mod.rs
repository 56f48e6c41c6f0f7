//! Capability directory: registration, liveness and staleness of
//! capability providers.
//!
//! Providers call [`register`](services::CapabilityDirectory::register) on
//! start-up and [`ping`](services::CapabilityDirectory::ping) periodically.
//! Routers look providers up by service name and type; operators sweep
//! providers that went silent with
//! [`cleanup_stale`](services::CapabilityDirectory::cleanup_stale).
//!
//! Targets and activity records live in separate stores and are only
//! eventually consistent: either may exist without the other.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
