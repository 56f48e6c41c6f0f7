//! Label-aware entity filtering.

use super::{LabelExpression, Labels};

/// An entity that carries a label map.
pub trait LabelAware {
    /// Returns the entity's labels.
    fn labels(&self) -> &Labels;
}

/// A compiled expression bound to a label extraction function.
///
/// The extractor fixes at compile time which entities can be filtered, so
/// no entity is ever converted to a label view at run time.
#[derive(Debug, Clone)]
pub struct LabelPredicate<E, F>
where
    F: Fn(&E) -> &Labels,
{
    expression: LabelExpression,
    extract: F,
    _entity: std::marker::PhantomData<fn(&E)>,
}

impl<E, F> LabelPredicate<E, F>
where
    F: Fn(&E) -> &Labels,
{
    /// Binds an expression to an extraction function.
    #[must_use]
    pub const fn new(expression: LabelExpression, extract: F) -> Self {
        Self {
            expression,
            extract,
            _entity: std::marker::PhantomData,
        }
    }

    /// Returns the bound expression.
    #[must_use]
    pub const fn expression(&self) -> &LabelExpression {
        &self.expression
    }

    /// Tests one entity.
    #[must_use]
    pub fn matches(&self, entity: &E) -> bool {
        self.expression.evaluate((self.extract)(entity))
    }

    /// Keeps the entities that match, preserving input order.
    #[must_use]
    pub fn filter(&self, entities: impl IntoIterator<Item = E>) -> Vec<E> {
        entities
            .into_iter()
            .filter(|entity| self.matches(entity))
            .collect()
    }
}

impl<E: LabelAware> LabelPredicate<E, fn(&E) -> &Labels> {
    /// Binds an expression to [`LabelAware::labels`].
    #[must_use]
    pub fn for_label_aware(expression: LabelExpression) -> Self {
        Self::new(expression, <E as LabelAware>::labels)
    }
}
