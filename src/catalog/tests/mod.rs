//! Tests for the label-aware catalog repositories.
