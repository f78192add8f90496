//! Labelled nodes.
use crate::{
    budget::Budget,
    error::ExpResult,
    exp::{Exp, ExpView, display_via_render},
    storage::budget_operand,
};

/// Attaches a label to a node for rendering.
///
/// Evaluation is forwarded unchanged and so is the budget, so wrapping a node in a label
/// never changes how it is stored by later compositions.
///
/// ```
/// use texpr::prelude::*;
///
/// let sum = name("sum", SimpleSpace::new(1) + SimpleSpace::new(2));
/// assert_eq!(sum.render().unwrap(), "sum(L9):(1 + 2)");
/// assert_eq!(level_of(&sum), 9);
/// ```
#[derive(Debug, Clone)]
pub struct Named<'a, E> {
    label: &'a str,
    inner: E,
}

impl<'a, E> Named<'a, E> {
    pub fn new(label: &'a str, inner: E) -> Self {
        Self { label, inner }
    }

    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<'a, E: Exp> Exp for Named<'a, E> {
    type Value = E::Value;
    type Budget = E::Budget;

    #[inline]
    fn eval(&self) -> ExpResult<Self::Value> {
        self.inner.eval()
    }

    fn view(&self) -> ExpResult<ExpView<'_, Self::Value>> {
        Ok(ExpView::Named {
            label: self.label,
            level: <E::Budget as Budget>::VALUE,
            inner: &self.inner,
        })
    }
}

budget_operand!(impl<'a, E> for Named<'a, E> where E: Exp);
display_via_render!(impl<'a, E> for Named<'a, E> where E: Exp);

/// Label `node` for rendering.
#[inline]
pub fn name<E: Exp>(label: &str, node: E) -> Named<'_, E> {
    Named::new(label, node)
}
