//! Unit tests for the label expression engine.


use super::Labels;

/// Builds a label map from `(key, value)` pairs.
pub(super) fn labels(pairs: &[(&str, &str)]) -> Labels {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}
