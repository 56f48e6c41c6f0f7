//! Label expression engine.
//!
//! Compiles boolean filter strings such as
//! `(category=weather | category=news) & !tier=beta` into a
//! [`LabelExpression`] and evaluates them against `key -> value` label maps.
//! The token set is closed: anything outside the grammar is rejected when
//! the expression is compiled, never at evaluation time.
//!
//! Operator precedence, lowest to highest: `|`, `&`, unary `!`, then
//! parenthesized groups and comparisons.

mod error;
mod expression;
mod filter;
mod lexer;
mod parser;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

pub use error::LabelExpressionParseError;
pub use expression::LabelExpression;
pub use filter::{LabelAware, LabelPredicate};
pub use lexer::MAX_EXPRESSION_LENGTH;

/// Label map attached to entities. Keys are unique and case-sensitive.
pub type Labels = BTreeMap<String, String>;
