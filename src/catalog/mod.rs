//! Label-aware catalog of tools, resources, namespaces and provider data.
//!
//! Every entity kind lives in its own collection and carries a label map.
//! [`LabelAwareRepository`](ports::LabelAwareRepository) lists or bulk
//! removes entities by a [`LabelExpression`](crate::labels::LabelExpression)
//! such as `env=prod & !tier=beta`.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
