//! Composable expressions: evaluation, structural views and textual rendering.
//!
//! Role
//! - [`Exp`] is implemented by leaves (every [`Space`]), composed nodes, decorators and
//!   handles. Evaluation is lazy: nothing is computed until [`Exp::eval`] is called.
//! - [`ExpView`] exposes one level of structure. Rendering, pretty printing and
//!   [`stats`](crate::inspect::stats) are all derived from it.
//!
//! Rendering format
//! - binary node: `(A + B)`
//! - named node: `label(Lk):inner` where `k` is the budget of `inner`
//! - variable: `$inner`
//! - erased handle: `@erased:inner`
//! - plain handle: `@inner`
//!
//! Example
//! ```
//! use texpr::prelude::*;
//!
//! let sum = SimpleSpace::new(2) + SimpleSpace::new(3);
//! assert_eq!(sum.eval().unwrap(), SimpleSpace::new(5));
//! assert_eq!(sum.render().unwrap(), "(2 + 3)");
//! assert_eq!(level_of(&sum), 9);
//! ```
use std::{borrow::Cow, fmt};

use crate::{
    budget::Budget,
    erased::{DynExp, Erased},
    error::ExpResult,
    space::Space,
};

/// An expression producing a value of space [`Exp::Value`].
///
/// Implementors provide [`eval`](Exp::eval) and [`view`](Exp::view); neither has a default
/// body, so a node type cannot exist without its own evaluation.
pub trait Exp {
    /// Value space the expression evaluates to.
    type Value: Space;

    /// Remaining composition budget of this expression type.
    type Budget: Budget;

    /// Integer value of [`Exp::Budget`].
    ///
    /// Must not be overridden. The crate itself reads `<Self::Budget as Budget>::VALUE`, so
    /// an override only changes what callers of this constant see.
    const LEVEL: u32 = <Self::Budget as Budget>::VALUE;

    /// Evaluate the expression.
    ///
    /// Evaluation never mutates the expression. Repeated calls return identical results
    /// unless an aliased [`Variable`](crate::variable::Variable) below this node observed a
    /// change of its external storage.
    fn eval(&self) -> ExpResult<Self::Value>;

    /// One level of structure of this expression.
    fn view(&self) -> ExpResult<ExpView<'_, Self::Value>>;

    /// Write the textual rendering of this expression to `out`.
    fn render_to(&self, out: &mut dyn fmt::Write) -> ExpResult<()> {
        render_view(self.view()?, out)
    }

    /// Textual rendering of this expression.
    fn render(&self) -> ExpResult<String> {
        let mut buf = String::new();
        self.render_to(&mut buf)?;
        Ok(buf)
    }

    /// Hide the concrete type of this expression behind a shared [`Erased`] handle.
    #[inline]
    fn erase<'a>(self) -> Erased<'a, Self::Value>
    where
        Self: Sized + 'a,
    {
        Erased::new(self)
    }
}

/// One level of an expression tree.
///
/// Children are borrowed through the erasure interface so that views of arbitrarily
/// shaped trees share one type.
pub enum ExpView<'e, V: Space> {
    /// A leaf value.
    Leaf(Cow<'e, V>),

    /// A binary operation.
    Binary {
        symbol: &'static str,
        lhs: &'e dyn DynExp<V>,
        rhs: &'e dyn DynExp<V>,
    },

    /// A labelled node; `level` is the budget of `inner`.
    Named {
        label: &'e str,
        level: u32,
        inner: &'e dyn DynExp<V>,
    },

    /// A variable and the value it currently reads.
    Variable(Cow<'e, V>),

    /// A shared, type-erased handle.
    Erased(&'e dyn DynExp<V>),

    /// A plain, non-erased indirection.
    Handle(&'e dyn DynExp<V>),
}

impl<'e, V: Space> ExpView<'e, V> {
    /// Direct children of this node, left to right.
    pub fn children(&self) -> impl Iterator<Item = &'e dyn DynExp<V>> + use<'e, V> {
        let (first, second) = match *self {
            ExpView::Leaf(_) | ExpView::Variable(_) => (None, None),
            ExpView::Binary { lhs, rhs, .. } => (Some(lhs), Some(rhs)),
            ExpView::Named { inner, .. } | ExpView::Erased(inner) | ExpView::Handle(inner) => {
                (Some(inner), None)
            }
        };
        first.into_iter().chain(second)
    }
}

impl<'e, V: Space> fmt::Debug for ExpView<'e, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpView::Leaf(v) => f.debug_tuple("Leaf").field(&format_args!("{v}")).finish(),
            ExpView::Binary { symbol, .. } => {
                f.debug_struct("Binary").field("symbol", symbol).finish_non_exhaustive()
            }
            ExpView::Named { label, level, .. } => f
                .debug_struct("Named")
                .field("label", label)
                .field("level", level)
                .finish_non_exhaustive(),
            ExpView::Variable(v) => f
                .debug_tuple("Variable")
                .field(&format_args!("{v}"))
                .finish(),
            ExpView::Erased(_) => f.write_str("Erased(..)"),
            ExpView::Handle(_) => f.write_str("Handle(..)"),
        }
    }
}

fn render_view<V: Space>(view: ExpView<'_, V>, out: &mut dyn fmt::Write) -> ExpResult<()> {
    match view {
        ExpView::Leaf(value) => write!(out, "{value}")?,
        ExpView::Binary { symbol, lhs, rhs } => {
            out.write_char('(')?;
            render_view(lhs.dyn_view()?, out)?;
            write!(out, " {symbol} ")?;
            render_view(rhs.dyn_view()?, out)?;
            out.write_char(')')?;
        }
        ExpView::Named {
            label,
            level,
            inner,
        } => {
            write!(out, "{label}(L{level}):")?;
            render_view(inner.dyn_view()?, out)?;
        }
        ExpView::Variable(value) => write!(out, "${value}")?,
        ExpView::Erased(inner) => {
            out.write_str("@erased:")?;
            render_view(inner.dyn_view()?, out)?;
        }
        ExpView::Handle(inner) => {
            out.write_char('@')?;
            render_view(inner.dyn_view()?, out)?;
        }
    }
    Ok(())
}

/// Every leaf value is an expression evaluating to itself.
impl<V: Space> Exp for V {
    type Value = V;
    type Budget = V::Budget;

    #[inline]
    fn eval(&self) -> ExpResult<V> {
        Ok(self.eval_leaf())
    }

    #[inline]
    fn view(&self) -> ExpResult<ExpView<'_, V>> {
        Ok(ExpView::Leaf(Cow::Borrowed(self)))
    }
}

/// Budget of `e`'s type.
#[inline]
pub fn level_of<E: Exp>(_: &E) -> u32 {
    <E::Budget as Budget>::VALUE
}

/// Implement [`fmt::Display`] for node types through [`Exp::render_to`].
macro_rules! display_via_render {
    (impl<$($gen:tt),*> for $ty:ty $(where $($bound:tt)+)?) => {
        impl<$($gen),*> ::std::fmt::Display for $ty
        where
            Self: $crate::exp::Exp,
            $($($bound)+)?
        {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::exp::Exp::render_to(self, f).map_err(|_| ::std::fmt::Error)
            }
        }
    };
}

pub(crate) use display_via_render;
