//! Key/value backend implementations.

pub mod memory;
pub mod postgres;
