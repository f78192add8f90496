//! Binary operation nodes and the composition operator.
//!
//! Role
//! - [`Binary`] holds two operands, each stored the way its type dictates (see
//!   [`storage`](crate::storage)), and an operator marker.
//! - [`compose`] is the public way to build one. It returns the node itself while its
//!   budget is positive, and an [`Erased`](crate::erased::Erased) handle wrapping it once
//!   the budget is exhausted, so callers never have to know which one occurred.
//!
//! Example
//! ```
//! use texpr::prelude::*;
//!
//! let a = SimpleSpace::new(1);
//! let b = SimpleSpace::new(2);
//! let sum = compose(a.clone(), b.clone());
//! assert_eq!(sum.eval().unwrap(), SimpleSpace::new(3));
//! assert_eq!(sum.render().unwrap(), "(1 + 2)");
//!
//! // `+` is sugar for `compose`.
//! let chained = sum + a;
//! assert_eq!(chained.eval().unwrap(), SimpleSpace::new(4));
//! assert_eq!(level_of(&chained), 8);
//! ```
//!
//! Operands from different value spaces cannot be composed:
//! ```compile_fail
//! use texpr::prelude::*;
//!
//! let scalar = SimpleSpace::new(1);
//! let vector = VectorSpace::new([1, 2]);
//! let _ = compose(scalar, vector);
//! ```
use std::{fmt, marker::PhantomData};

use crate::{
    budget::{Budget, Decremented, next_level},
    erased::{Erased, Handle},
    error::ExpResult,
    exp::{Exp, ExpView, display_via_render},
    named::Named,
    space::Space,
    storage::{IntoOperand, Operand, StorageKind, budget_operand},
    variable::Variable,
};

/// A binary operator over value spaces.
pub trait BinaryOperator {
    /// Symbol used when rendering the node.
    const SYMBOL: &'static str;

    /// Apply the operator to two evaluated operands.
    fn apply<V: Space>(lhs: &V, rhs: &V) -> V;
}

/// Sum: merges operands with [`Space::combine`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumOp;

impl BinaryOperator for SumOp {
    const SYMBOL: &'static str = "+";

    #[inline]
    fn apply<V: Space>(lhs: &V, rhs: &V) -> V {
        lhs.combine(rhs)
    }
}

/// Binary operation node.
///
/// `A` and `B` are the storage slot types of the operands, not necessarily the types that
/// were composed: an exhausted operand appears here as an erased handle.
pub struct Binary<'a, O, A: Exp, B: Exp> {
    lhs: Operand<'a, A>,
    rhs: Operand<'a, B>,
    _op: PhantomData<O>,
}

/// Sum node.
pub type Sum<'a, A, B> = Binary<'a, SumOp, A, B>;

impl<'a, O, A, B> Binary<'a, O, A, B>
where
    O: BinaryOperator,
    A: Exp + 'a,
    B: Exp<Value = A::Value> + 'a,
{
    pub(crate) fn new(lhs: Operand<'a, A>, rhs: Operand<'a, B>) -> Self {
        debug_assert_eq!(
            <<Self as Exp>::Budget as Budget>::VALUE,
            next_level(<A::Budget as Budget>::VALUE, <B::Budget as Budget>::VALUE),
            "Budget of a binary node must follow the composition law"
        );
        Self {
            lhs,
            rhs,
            _op: PhantomData,
        }
    }

    pub fn lhs(&self) -> &Operand<'a, A> {
        &self.lhs
    }

    pub fn rhs(&self) -> &Operand<'a, B> {
        &self.rhs
    }

    /// Storage chosen for the left and right operands.
    pub fn storage(&self) -> (StorageKind, StorageKind) {
        (self.lhs.kind(), self.rhs.kind())
    }
}

impl<'a, O, A, B> Exp for Binary<'a, O, A, B>
where
    O: BinaryOperator,
    A: Exp + 'a,
    B: Exp<Value = A::Value> + 'a,
{
    type Value = A::Value;
    type Budget = Decremented<A::Budget, B::Budget>;

    fn eval(&self) -> ExpResult<Self::Value> {
        let lhs = self.lhs.eval()?;
        let rhs = self.rhs.eval()?;
        Ok(O::apply(&lhs, &rhs))
    }

    fn view(&self) -> ExpResult<ExpView<'_, Self::Value>> {
        Ok(ExpView::Binary {
            symbol: O::SYMBOL,
            lhs: self.lhs.as_dyn(),
            rhs: self.rhs.as_dyn(),
        })
    }
}

impl<'a, O, A, B> Clone for Binary<'a, O, A, B>
where
    A: Exp + Clone,
    B: Exp + Clone,
{
    fn clone(&self) -> Self {
        Self {
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            _op: PhantomData,
        }
    }
}

impl<'a, O, A, B> fmt::Debug for Binary<'a, O, A, B>
where
    A: Exp + fmt::Debug,
    B: Exp + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binary")
            .field("op", &std::any::type_name::<O>())
            .field("lhs", &self.lhs)
            .field("rhs", &self.rhs)
            .finish()
    }
}

budget_operand!(
    impl<'a, O, A, B> for Binary<'a, O, A, B>
    where O: BinaryOperator, A: Exp + 'a, B: Exp<Value = A::Value> + 'a
);
display_via_render!(
    impl<'a, O, A, B> for Binary<'a, O, A, B>
    where O: BinaryOperator, A: Exp + 'a, B: Exp<Value = A::Value> + 'a
);

/// Slot type an operand of type `E` is stored as.
pub type Stored<'a, E> = <E as IntoOperand<'a>>::Slot;

/// Representation a node with the budget of its own type resolves to.
pub type Resolved<'a, E> = <<E as Exp>::Budget as Budget>::Slot<'a, E>;

/// Type returned by [`compose`]`(A, B)`.
pub type Composed<'a, A, B> = Resolved<'a, Sum<'a, Stored<'a, A>, Stored<'a, B>>>;

/// Compose two expressions into a sum.
///
/// Both operands may be leaves, composed nodes, decorators or handles. Each is stored as
/// its budget dictates; the result is the sum node or, once its own budget is exhausted,
/// an erased handle to it. Nothing is evaluated here.
pub fn compose<'a, A, B>(lhs: A, rhs: B) -> Composed<'a, A, B>
where
    A: IntoOperand<'a>,
    B: IntoOperand<'a, Value = A::Value>,
{
    let node: Sum<'a, A::Slot, B::Slot> = Binary::new(lhs.into_operand(), rhs.into_operand());
    <<Sum<'a, A::Slot, B::Slot> as Exp>::Budget as Budget>::resolve(node)
}

/// Alias of [`compose`].
#[inline]
pub fn combine_expressions<'a, A, B>(lhs: A, rhs: B) -> Composed<'a, A, B>
where
    A: IntoOperand<'a>,
    B: IntoOperand<'a, Value = A::Value>,
{
    compose(lhs, rhs)
}

/// `+` sugar for node types of this crate; leaf types opt in with
/// [`space_ops!`](crate::space_ops).
macro_rules! node_add {
    (impl<$lft:lifetime $(, $gen:ident)*> for $ty:ty $(where $($bound:tt)+)?) => {
        impl<$lft, $($gen,)* R> ::std::ops::Add<R> for $ty
        where
            Self: IntoOperand<$lft>,
            R: IntoOperand<$lft, Value = <Self as Exp>::Value>,
            $($($bound)+)?
        {
            type Output = Composed<$lft, Self, R>;

            #[inline]
            fn add(self, rhs: R) -> Self::Output {
                compose(self, rhs)
            }
        }
    };
}

node_add!(impl<'a, O, A, B> for Binary<'a, O, A, B> where A: Exp, B: Exp);
node_add!(impl<'a, E> for Named<'a, E>);
node_add!(impl<'a, V> for Variable<'a, V> where V: Space);
node_add!(impl<'a, V> for Erased<'a, V> where V: Space);
node_add!(impl<'a, E> for Handle<'a, E>);
