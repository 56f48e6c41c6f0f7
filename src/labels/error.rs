//! Error type for label expression parsing.

use thiserror::Error;

/// Error returned when a label expression does not match the grammar.
///
/// `position` is the byte offset into the original input where parsing
/// stopped. For failures that are only detected at the end of input it is
/// the input length.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid label expression at position {position}: {message}")]
pub struct LabelExpressionParseError {
    position: usize,
    message: String,
}

impl LabelExpressionParseError {
    /// Creates a parse error at the given byte offset.
    #[must_use]
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }

    /// Returns the byte offset where parsing failed.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the human-readable failure reason.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
