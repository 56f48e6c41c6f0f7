//! Compiled label expressions.

use super::{LabelExpressionParseError, Labels, parser};
use std::fmt;

/// A compiled boolean predicate over a label map.
///
/// Built by [`LabelExpression::parse`]; evaluation is pure and never fails.
///
/// # Examples
///
/// ```
/// use capability_directory::labels::{LabelExpression, Labels};
///
/// let expression = LabelExpression::parse("category=weather & !tier=beta")
///     .expect("valid expression");
///
/// let mut labels = Labels::new();
/// labels.insert("category".to_owned(), "weather".to_owned());
/// assert!(expression.evaluate(&labels));
///
/// labels.insert("tier".to_owned(), "beta".to_owned());
/// assert!(!expression.evaluate(&labels));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelExpression {
    /// Matches every label map. Produced for blank input.
    MatchAll,
    /// `key=value`: the key is present and bound to exactly `value`.
    Equals {
        /// Label key.
        key: String,
        /// Expected value.
        value: String,
    },
    /// `key!=value`: the key is absent or bound to a different value.
    NotEquals {
        /// Label key.
        key: String,
        /// Rejected value.
        value: String,
    },
    /// `!expr`.
    Not(Box<LabelExpression>),
    /// `left & right`, short-circuiting.
    And(Box<LabelExpression>, Box<LabelExpression>),
    /// `left | right`, short-circuiting.
    Or(Box<LabelExpression>, Box<LabelExpression>),
}

impl LabelExpression {
    /// Compiles a textual label expression.
    ///
    /// Blank input (empty or whitespace only) compiles to
    /// [`LabelExpression::MatchAll`].
    ///
    /// # Errors
    ///
    /// Returns [`LabelExpressionParseError`] when the input contains
    /// characters outside the label alphabet, is too long, has unbalanced
    /// parentheses, a malformed comparison, or trailing tokens.
    pub fn parse(input: &str) -> Result<Self, LabelExpressionParseError> {
        if input.trim().is_empty() {
            return Ok(Self::MatchAll);
        }
        parser::parse(input)
    }

    /// Returns whether this expression matches every label map trivially.
    #[must_use]
    pub const fn is_match_all(&self) -> bool {
        matches!(self, Self::MatchAll)
    }

    /// Evaluates the expression against a label map.
    #[must_use]
    pub fn evaluate(&self, labels: &Labels) -> bool {
        match self {
            Self::MatchAll => true,
            Self::Equals { key, value } => labels.get(key).is_some_and(|bound| bound == value),
            Self::NotEquals { key, value } => labels.get(key).is_none_or(|bound| bound != value),
            Self::Not(inner) => !inner.evaluate(labels),
            Self::And(left, right) => left.evaluate(labels) && right.evaluate(labels),
            Self::Or(left, right) => left.evaluate(labels) || right.evaluate(labels),
        }
    }
}

impl fmt::Display for LabelExpression {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MatchAll => Ok(()),
            Self::Equals { key, value } => write!(formatter, "{key}={value}"),
            Self::NotEquals { key, value } => write!(formatter, "{key}!={value}"),
            Self::Not(inner) => write!(formatter, "!{}", Grouped(inner)),
            Self::And(left, right) => {
                write!(formatter, "{} & {}", Grouped(left), Grouped(right))
            }
            Self::Or(left, right) => write!(formatter, "{left} | {right}"),
        }
    }
}

/// Parenthesizes compound operands so the rendered form re-parses to an
/// equivalent expression.
struct Grouped<'a>(&'a LabelExpression);

impl fmt::Display for Grouped<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            LabelExpression::Or(..) | LabelExpression::And(..) => write!(formatter, "({})", self.0),
            other => write!(formatter, "{other}"),
        }
    }
}
