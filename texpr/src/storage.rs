//! Operand storage: how a parent node holds each of its operands.
//!
//! Role
//! - [`Operand`] is the two-case representation of an operand: held by value inside the
//!   parent, or behind an owning, shared, dynamically dispatched [`Erased`] handle.
//! - [`IntoOperand`] selects that representation once, when the parent is constructed.
//!   Leaves, variables and nodes with budget left are embedded; nodes whose budget is
//!   exhausted and handles that are already erased are stored erased.
use std::fmt;

use strum::{Display, EnumIs};

use crate::{
    budget::Budget,
    erased::{DynExp, Erased},
    error::ExpResult,
    exp::{Exp, ExpView},
    space::Space,
};

/// Which representation an operand uses inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
#[strum(serialize_all = "lowercase")]
pub enum StorageKind {
    /// Held by value (or by a non-owning alias) with no allocation and no dynamic dispatch.
    Embedded,
    /// Held behind an owning, reference-counted, dynamically dispatched handle.
    Erased,
}

/// An operand as stored inside a parent node.
///
/// `Erased` is only ever built for operands whose slot type `E` is itself
/// `Erased<'a, E::Value>` (see [`IntoOperand`] and [`Budget::store`]), so the budget of `E`
/// is the budget of the operand in both cases.
#[derive(Clone)]
pub enum Operand<'a, E: Exp> {
    Embedded(E),
    Erased(Erased<'a, E::Value>),
}

impl<'a, E: Exp> Operand<'a, E> {
    /// Representation chosen for this operand.
    #[inline]
    pub fn kind(&self) -> StorageKind {
        match self {
            Operand::Embedded(_) => StorageKind::Embedded,
            Operand::Erased(_) => StorageKind::Erased,
        }
    }

    /// Borrow the operand through the erasure interface, whatever its storage.
    #[inline]
    pub fn as_dyn(&self) -> &(dyn DynExp<E::Value> + '_) {
        match self {
            Operand::Embedded(inner) => inner,
            Operand::Erased(handle) => handle,
        }
    }

    /// Budget the parent sees for this operand. Erased operands start over with the default
    /// budget.
    #[inline]
    pub fn level(&self) -> u32 {
        <E::Budget as Budget>::VALUE
    }
}

impl<'a, E: Exp + fmt::Debug> fmt::Debug for Operand<'a, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Embedded(inner) => f.debug_tuple("Embedded").field(inner).finish(),
            Operand::Erased(handle) => f.debug_tuple("Erased").field(handle).finish(),
        }
    }
}

impl<'a, E: Exp> Exp for Operand<'a, E> {
    type Value = E::Value;
    type Budget = E::Budget;

    #[inline]
    fn eval(&self) -> ExpResult<Self::Value> {
        match self {
            Operand::Embedded(inner) => inner.eval(),
            Operand::Erased(handle) => handle.eval(),
        }
    }

    #[inline]
    fn view(&self) -> ExpResult<ExpView<'_, Self::Value>> {
        match self {
            Operand::Embedded(inner) => inner.view(),
            Operand::Erased(handle) => handle.view(),
        }
    }
}

impl<'a, E: Exp> fmt::Display for Operand<'a, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_to(f).map_err(|_| fmt::Error)
    }
}

/// Storage selector: turns a value into the operand representation its type dictates.
///
/// `Slot` is the type the parent node is generic over. For an exhausted node it is
/// [`Erased`], not the node's own type, which bounds how deep generic node types nest.
pub trait IntoOperand<'a>: Exp + 'a {
    /// Type stored inside the parent.
    type Slot: Exp<Value = Self::Value> + 'a;

    /// Convert into the operand representation.
    fn into_operand(self) -> Operand<'a, Self::Slot>;
}

impl<'a, V: Space> IntoOperand<'a> for V {
    type Slot = V;

    #[inline]
    fn into_operand(self) -> Operand<'a, V> {
        Operand::Embedded(self)
    }
}

impl<'a, V: Space> IntoOperand<'a> for Erased<'a, V> {
    type Slot = Erased<'a, V>;

    #[inline]
    fn into_operand(self) -> Operand<'a, Self::Slot> {
        Operand::Erased(self)
    }
}

/// Storage of a node type that follows its own budget.
pub type BudgetSlot<'a, E> = <<E as Exp>::Budget as Budget>::Slot<'a, E>;

/// Implement [`IntoOperand`] for a node type by dispatching on its budget.
macro_rules! budget_operand {
    (
        impl<$lft:lifetime $(, $gen:ident)*> for $ty:ty
        $(where $($bound:tt)+)?
    ) => {
        impl<$lft $(, $gen)*> $crate::storage::IntoOperand<$lft> for $ty
        where
            Self: $crate::exp::Exp + $lft,
            $($($bound)+)?
        {
            type Slot = $crate::storage::BudgetSlot<$lft, Self>;

            #[inline]
            fn into_operand(self) -> $crate::storage::Operand<$lft, Self::Slot> {
                <<Self as $crate::exp::Exp>::Budget as $crate::budget::Budget>::store(self)
            }
        }
    };
}

pub(crate) use budget_operand;
