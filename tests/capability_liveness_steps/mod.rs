//! Step definitions for capability liveness scenarios.

mod then;
mod when;
pub mod world;
