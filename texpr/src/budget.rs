//! Composition budgets encoded as type-level naturals.
//!
//! Role
//! - Every expression type carries a [`Budget`]: how many more times it may be embedded
//!   directly into a parent before its concrete type has to be hidden behind an
//!   [`Erased`] handle.
//! - Composing `A` and `B` yields budget `max(0, min(La, Lb) - 1)`, see [`Decremented`].
//!
//! Encoding
//! - The budget decides the *type* a node is stored as, so it is itself a type. The
//!   representation is fixed at compile time and nested generic types stop at each
//!   erasure point.
//!
//! Example
//! ```
//! use texpr::budget::*;
//!
//! assert_eq!(<MinOf<B3, B7> as Budget>::VALUE, 3);
//! assert_eq!(<Decremented<B3, B7> as Budget>::VALUE, 2);
//! assert_eq!(<Decremented<B0, B7> as Budget>::VALUE, 0);
//! assert_eq!(next_level(3, 7), 2);
//! ```
use std::marker::PhantomData;

use log::debug;

use crate::{
    erased::Erased,
    exp::Exp,
    storage::{Operand, StorageKind},
};

/// A composition budget, i.e. a type-level natural number.
///
/// Implemented only by [`Exhausted`] (zero) and [`Next`] (successor).
pub trait Budget {
    /// Integer value of the budget.
    const VALUE: u32;

    /// Storage used when a node with this budget becomes an operand.
    const STORAGE: StorageKind;

    /// Saturating predecessor.
    type Pred: Budget;

    /// Minimum of `Self` and `O`.
    type Min<O: Budget>: Budget;

    /// Minimum of `Next<N>` and `Self`. Helper for [`Budget::Min`].
    #[doc(hidden)]
    type MinNext<N: Budget>: Budget;

    /// Representation of a node `E` whose budget is `Self`: `E` itself while the budget is
    /// positive, an [`Erased`] handle once it is exhausted.
    type Slot<'a, E: Exp + 'a>: Exp<Value = E::Value> + 'a;

    /// Convert a node to the representation dictated by this budget.
    fn resolve<'a, E: Exp + 'a>(node: E) -> Self::Slot<'a, E>;

    /// Store a node with this budget as an operand of a parent node.
    fn store<'a, E: Exp + 'a>(node: E) -> Operand<'a, Self::Slot<'a, E>>;
}

/// Zero budget: nodes of this budget are never embedded directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exhausted;

/// Successor budget `N + 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Next<N>(PhantomData<N>);

impl Budget for Exhausted {
    const VALUE: u32 = 0;
    const STORAGE: StorageKind = StorageKind::Erased;

    type Pred = Exhausted;
    type Min<O: Budget> = Exhausted;
    type MinNext<N: Budget> = Exhausted;
    type Slot<'a, E: Exp + 'a> = Erased<'a, E::Value>;

    #[inline]
    fn resolve<'a, E: Exp + 'a>(node: E) -> Self::Slot<'a, E> {
        debug!(
            "Composition budget exhausted, erasing `{}`",
            std::any::type_name::<E>()
        );
        Erased::new(node)
    }

    #[inline]
    fn store<'a, E: Exp + 'a>(node: E) -> Operand<'a, Self::Slot<'a, E>> {
        debug!(
            "Operand `{}` has no budget left, storing it behind an erased handle",
            std::any::type_name::<E>()
        );
        Operand::Erased(Erased::new(node))
    }
}

impl<N: Budget> Budget for Next<N> {
    const VALUE: u32 = N::VALUE + 1;
    const STORAGE: StorageKind = StorageKind::Embedded;

    type Pred = N;
    type Min<O: Budget> = O::MinNext<N>;
    type MinNext<M: Budget> = Next<M::Min<N>>;
    type Slot<'a, E: Exp + 'a> = E;

    #[inline]
    fn resolve<'a, E: Exp + 'a>(node: E) -> Self::Slot<'a, E> {
        node
    }

    #[inline]
    fn store<'a, E: Exp + 'a>(node: E) -> Operand<'a, Self::Slot<'a, E>> {
        Operand::Embedded(node)
    }
}

pub type B0 = Exhausted;
pub type B1 = Next<B0>;
pub type B2 = Next<B1>;
pub type B3 = Next<B2>;
pub type B4 = Next<B3>;
pub type B5 = Next<B4>;
pub type B6 = Next<B5>;
pub type B7 = Next<B6>;
pub type B8 = Next<B7>;
pub type B9 = Next<B8>;
pub type B10 = Next<B9>;

/// Budget of leaves and erased handles.
pub type DefaultBudget = B10;

/// Integer value of [`DefaultBudget`].
pub const DEFAULT_LEVEL: u32 = <DefaultBudget as Budget>::VALUE;

/// Minimum of two budgets.
pub type MinOf<A, B> = <A as Budget>::Min<B>;

/// Budget of a node composed from operands with budgets `A` and `B`.
pub type Decremented<A, B> = <MinOf<A, B> as Budget>::Pred;

/// Budget law over plain integers: `max(0, min(lhs, rhs) - 1)`.
#[inline]
pub const fn next_level(lhs: u32, rhs: u32) -> u32 {
    let min = if lhs < rhs { lhs } else { rhs };
    min.saturating_sub(1)
}
