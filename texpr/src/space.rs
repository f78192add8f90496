//! Value spaces: the leaf values expressions are built from.
//!
//! Role
//! - A [`Space`] is any plain value that can be merged with another value of the same
//!   kind and printed. Every space is automatically a leaf expression.
//! - The engine assumes nothing else about a space: no arithmetic, no ordering, no hashing.
use std::fmt;

use crate::budget::Budget;

/// Capability set required from a leaf value type.
///
/// Role
/// - [`combine`](Space::combine) is the binary merge used by composed nodes.
/// - [`eval_leaf`](Space::eval_leaf) evaluates the leaf itself; it must be idempotent.
/// - Rendering goes through [`fmt::Display`].
///
/// Budget
/// - `Budget` is the composition budget a leaf of this space starts with. Most spaces use
///   [`DefaultBudget`](crate::budget::DefaultBudget); a smaller budget makes chains over this
///   space fall back to erased storage sooner.
pub trait Space: Clone + fmt::Display + 'static {
    /// Budget of a leaf of this space.
    type Budget: Budget;

    /// Merge two values into a new value of the same space.
    fn combine(&self, other: &Self) -> Self;

    /// Evaluate the leaf. Defaults to a copy of the value.
    #[inline]
    fn eval_leaf(&self) -> Self {
        self.clone()
    }
}

/// Implement the `+` composition sugar for a leaf type against every node kind of this crate.
///
/// Orphan rules prevent a blanket `Add` implementation over all spaces, so each space opts
/// in once:
///
/// ```
/// use std::fmt;
/// use texpr::prelude::*;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Text(String);
///
/// impl fmt::Display for Text {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{:?}", self.0)
///     }
/// }
///
/// impl Space for Text {
///     type Budget = DefaultBudget;
///     fn combine(&self, other: &Self) -> Self {
///         Text(format!("{}{}", self.0, other.0))
///     }
/// }
///
/// texpr::space_ops!(Text);
///
/// let joined = Text("ab".into()) + Text("cd".into());
/// assert_eq!(joined.eval().unwrap(), Text("abcd".into()));
/// assert_eq!(joined.render().unwrap(), "(\"ab\" + \"cd\")");
/// ```
///
/// Generic spaces list their parameters in brackets after `impl`:
/// `texpr::space_ops!(impl[const N: usize] VectorSpace<N>);`
#[macro_export]
macro_rules! space_ops {
    (@impl [$($gen:tt)*] $space:ty) => {
        impl<$($gen)*> ::core::ops::Add<$space> for $space {
            type Output = $crate::binary::Composed<'static, $space, $space>;

            #[inline]
            fn add(self, rhs: $space) -> Self::Output {
                $crate::binary::compose(self, rhs)
            }
        }

        impl<'a, O, A, B, $($gen)*> ::core::ops::Add<$crate::binary::Binary<'a, O, A, B>> for $space
        where
            A: $crate::exp::Exp,
            B: $crate::exp::Exp,
            $crate::binary::Binary<'a, O, A, B>: $crate::storage::IntoOperand<'a, Value = $space>,
        {
            type Output = $crate::binary::Composed<'a, $space, $crate::binary::Binary<'a, O, A, B>>;

            #[inline]
            fn add(self, rhs: $crate::binary::Binary<'a, O, A, B>) -> Self::Output {
                $crate::binary::compose(self, rhs)
            }
        }

        impl<'a, E, $($gen)*> ::core::ops::Add<$crate::named::Named<'a, E>> for $space
        where
            $crate::named::Named<'a, E>: $crate::storage::IntoOperand<'a, Value = $space>,
        {
            type Output = $crate::binary::Composed<'a, $space, $crate::named::Named<'a, E>>;

            #[inline]
            fn add(self, rhs: $crate::named::Named<'a, E>) -> Self::Output {
                $crate::binary::compose(self, rhs)
            }
        }

        impl<'a, E, $($gen)*> ::core::ops::Add<$crate::erased::Handle<'a, E>> for $space
        where
            $crate::erased::Handle<'a, E>: $crate::storage::IntoOperand<'a, Value = $space>,
        {
            type Output = $crate::binary::Composed<'a, $space, $crate::erased::Handle<'a, E>>;

            #[inline]
            fn add(self, rhs: $crate::erased::Handle<'a, E>) -> Self::Output {
                $crate::binary::compose(self, rhs)
            }
        }

        impl<'a, $($gen)*> ::core::ops::Add<$crate::variable::Variable<'a, $space>> for $space {
            type Output = $crate::binary::Composed<'a, $space, $crate::variable::Variable<'a, $space>>;

            #[inline]
            fn add(self, rhs: $crate::variable::Variable<'a, $space>) -> Self::Output {
                $crate::binary::compose(self, rhs)
            }
        }

        impl<'a, $($gen)*> ::core::ops::Add<$crate::erased::Erased<'a, $space>> for $space {
            type Output = $crate::binary::Composed<'a, $space, $crate::erased::Erased<'a, $space>>;

            #[inline]
            fn add(self, rhs: $crate::erased::Erased<'a, $space>) -> Self::Output {
                $crate::binary::compose(self, rhs)
            }
        }
    };
    (impl [$($gen:tt)*] $space:ty) => {
        $crate::space_ops!(@impl [$($gen)*] $space);
    };
    ($space:ty) => {
        $crate::space_ops!(@impl [] $space);
    };
}
