//! Type erasure boundary.
//!
//! Role
//! - [`DynExp`] is the object-safe face of every expression: evaluate and describe
//!   structure for one fixed value space.
//! - [`Erased`] owns a shared, reference-counted node behind that interface. Trees of any
//!   shape that evaluate to the same space share this one type, which is where budget
//!   exhausted chains end up.
//! - [`Handle`] is the non-erased counterpart: a typed, non-owning alias to a node owned
//!   elsewhere.
//!
//! Cost
//! - One allocation per erased node and one virtual dispatch per evaluation through it.
//!   Clones share the node.
use std::{fmt, rc::Rc};

use log::{trace, warn};

use crate::{
    budget::{Budget, DefaultBudget},
    error::{ExpError, ExpResult},
    exp::{Exp, ExpView, display_via_render},
    space::Space,
    storage::budget_operand,
};

/// Object-safe expression interface for value space `V`.
pub trait DynExp<V: Space> {
    /// Evaluate through dynamic dispatch.
    fn dyn_eval(&self) -> ExpResult<V>;

    /// Structural view through dynamic dispatch.
    fn dyn_view(&self) -> ExpResult<ExpView<'_, V>>;

    /// Budget of the concrete type behind the interface.
    fn dyn_level(&self) -> u32;
}

impl<E: Exp> DynExp<E::Value> for E {
    #[inline]
    fn dyn_eval(&self) -> ExpResult<E::Value> {
        self.eval()
    }

    #[inline]
    fn dyn_view(&self) -> ExpResult<ExpView<'_, E::Value>> {
        self.view()
    }

    #[inline]
    fn dyn_level(&self) -> u32 {
        <E::Budget as Budget>::VALUE
    }
}

/// Owning, shared handle to a node whose concrete type is hidden.
///
/// A handle is either bound to a node or unbound ([`Erased::unbound`]). Evaluating or
/// rendering an unbound handle fails with [`ExpError::NullHandleDereference`].
///
/// ```
/// use texpr::prelude::*;
///
/// let handle: Erased<'_, SimpleSpace> = Erased::unbound();
/// assert!(handle.eval().unwrap_err().is_null_handle_dereference());
///
/// let bound = (SimpleSpace::new(1) + SimpleSpace::new(2)).erase();
/// assert_eq!(bound.eval().unwrap(), SimpleSpace::new(3));
/// assert_eq!(bound.render().unwrap(), "@erased:(1 + 2)");
/// ```
pub struct Erased<'a, V: Space> {
    node: Option<Rc<dyn DynExp<V> + 'a>>,
}

impl<'a, V: Space> Erased<'a, V> {
    /// Erase `node` into a new shared handle.
    pub fn new<E>(node: E) -> Self
    where
        E: Exp<Value = V> + 'a,
    {
        Self {
            node: Some(Rc::new(node)),
        }
    }

    /// Wrap an already shared node.
    pub fn from_rc(node: Rc<dyn DynExp<V> + 'a>) -> Self {
        Self { node: Some(node) }
    }

    /// A handle that is not bound to any node.
    pub const fn unbound() -> Self {
        Self { node: None }
    }

    /// Whether the handle holds a node.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.node.is_some()
    }

    /// Whether both handles share the same node. Unbound handles never compare equal.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.node, &other.node) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Number of handles sharing the node, or zero when unbound.
    pub fn share_count(&self) -> usize {
        self.node.as_ref().map_or(0, Rc::strong_count)
    }

    /// Budget of the node behind the handle, or `None` when unbound.
    pub fn inner_level(&self) -> Option<u32> {
        self.node.as_ref().map(|node| node.dyn_level())
    }

    /// Access the node, failing when the handle is unbound.
    pub fn node(&self) -> ExpResult<&(dyn DynExp<V> + 'a)> {
        match &self.node {
            Some(node) => Ok(node.as_ref()),
            None => {
                warn!("Dereferenced an unbound erased handle");
                Err(ExpError::NullHandleDereference)
            }
        }
    }
}

impl<'a, V: Space> Default for Erased<'a, V> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<'a, V: Space> Clone for Erased<'a, V> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
        }
    }
}

impl<'a, V: Space> fmt::Debug for Erased<'a, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Erased")
            .field("bound", &self.is_bound())
            .field("shares", &self.share_count())
            .finish()
    }
}

impl<'a, V: Space> Exp for Erased<'a, V> {
    type Value = V;
    type Budget = DefaultBudget;

    fn eval(&self) -> ExpResult<V> {
        let node = self.node()?;
        trace!("Dispatching evaluation through an erased handle");
        node.dyn_eval()
    }

    fn view(&self) -> ExpResult<ExpView<'_, V>> {
        Ok(ExpView::Erased(self.node()?))
    }
}

display_via_render!(impl<'a, V> for Erased<'a, V> where V: Space);

/// Non-owning, typed alias to a node owned elsewhere.
///
/// Lets an existing node take part in several compositions without being cloned or
/// erased. The budget of the aliased node is forwarded unchanged.
#[derive(Debug)]
pub struct Handle<'a, E> {
    inner: &'a E,
}

impl<'a, E> Handle<'a, E> {
    pub fn new(inner: &'a E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &'a E {
        self.inner
    }
}

impl<'a, E> Clone for Handle<'a, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, E> Copy for Handle<'a, E> {}

impl<'a, E: Exp> Exp for Handle<'a, E> {
    type Value = E::Value;
    type Budget = E::Budget;

    #[inline]
    fn eval(&self) -> ExpResult<Self::Value> {
        self.inner.eval()
    }

    #[inline]
    fn view(&self) -> ExpResult<ExpView<'_, Self::Value>> {
        Ok(ExpView::Handle(self.inner))
    }
}

budget_operand!(impl<'a, E> for Handle<'a, E> where E: Exp);
display_via_render!(impl<'a, E> for Handle<'a, E> where E: Exp);

/// Alias `node` without taking ownership of it.
#[inline]
pub fn handle<E: Exp>(node: &E) -> Handle<'_, E> {
    Handle::new(node)
}
