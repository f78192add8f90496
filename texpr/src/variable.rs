//! Variables: leaves bound to storage outside the expression tree.
//!
//! Role
//! - An *aliased* variable borrows caller-owned storage. Every evaluation reads the value
//!   the storage holds at that moment; this is the only way an expression can observe a
//!   change after it was built.
//! - A *shared* variable clones the value once, at construction, and is independent of
//!   the source afterwards.
//!
//! The referent of an aliased variable must outlive every tree the variable is part of.
//! The `'a` lifetime makes that a borrow-check obligation of the caller.
//!
//! Example
//! ```
//! use std::cell::RefCell;
//! use texpr::prelude::*;
//!
//! let storage = RefCell::new(SimpleSpace::new(44));
//! let tree = SimpleSpace::new(500) + Variable::aliased(&storage);
//! assert_eq!(tree.eval().unwrap().value(), 544);
//!
//! storage.borrow_mut().set_value(33);
//! assert_eq!(tree.eval().unwrap().value(), 533);
//! assert_eq!(tree.render().unwrap(), "(500 + $33)");
//! ```
//!
//! A tree cannot outlive the storage of its aliased variables:
//! ```compile_fail
//! use std::cell::RefCell;
//! use texpr::prelude::*;
//!
//! let tree;
//! {
//!     let storage = RefCell::new(SimpleSpace::new(1));
//!     tree = SimpleSpace::new(2) + Variable::aliased(&storage);
//! }
//! tree.eval().unwrap();
//! ```
use std::{borrow::Cow, cell::RefCell};

use strum::{Display, EnumIs};

use crate::{
    error::{ExpError, ExpResult},
    exp::{Exp, ExpView, display_via_render},
    space::Space,
    storage::budget_operand,
};

/// How a variable is bound to its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
#[strum(serialize_all = "lowercase")]
pub enum BindingMode {
    Aliased,
    Shared,
}

/// The value a variable reads.
#[derive(Debug, Clone)]
pub enum Binding<'a, V> {
    /// Non-owning reference to caller-owned, mutable storage.
    Aliased(&'a RefCell<V>),
    /// Owned copy of the value.
    Shared(V),
}

impl<'a, V> Binding<'a, V> {
    pub fn mode(&self) -> BindingMode {
        match self {
            Binding::Aliased(_) => BindingMode::Aliased,
            Binding::Shared(_) => BindingMode::Shared,
        }
    }
}

/// Leaf whose value lives in a [`Binding`].
#[derive(Debug, Clone)]
pub struct Variable<'a, V: Space> {
    binding: Binding<'a, V>,
}

impl<'a, V: Space> Variable<'a, V> {
    /// Bind to caller-owned storage; evaluation reads its current value.
    pub fn aliased(storage: &'a RefCell<V>) -> Self {
        Self {
            binding: Binding::Aliased(storage),
        }
    }

    /// Bind to a private copy of `value`.
    pub fn shared(value: &V) -> Self {
        Self {
            binding: Binding::Shared(value.clone()),
        }
    }

    pub fn mode(&self) -> BindingMode {
        self.binding.mode()
    }

    pub fn binding(&self) -> &Binding<'a, V> {
        &self.binding
    }

    /// Current value of the variable.
    pub fn read(&self) -> ExpResult<Cow<'_, V>> {
        match &self.binding {
            Binding::Aliased(storage) => {
                let value = storage
                    .try_borrow()
                    .map_err(|_| ExpError::BindingBorrowed)?;
                Ok(Cow::Owned(value.clone()))
            }
            Binding::Shared(value) => Ok(Cow::Borrowed(value)),
        }
    }
}

impl<'a, V: Space> Exp for Variable<'a, V> {
    type Value = V;
    type Budget = V::Budget;

    fn eval(&self) -> ExpResult<V> {
        match &self.binding {
            Binding::Aliased(storage) => storage
                .try_borrow()
                .map(|value| value.eval_leaf())
                .map_err(|_| ExpError::BindingBorrowed),
            Binding::Shared(value) => Ok(value.eval_leaf()),
        }
    }

    #[inline]
    fn view(&self) -> ExpResult<ExpView<'_, V>> {
        Ok(ExpView::Variable(self.read()?))
    }
}

budget_operand!(impl<'a, V> for Variable<'a, V> where V: Space);
display_via_render!(impl<'a, V> for Variable<'a, V> where V: Space);

/// Build a variable from an explicit binding.
#[inline]
pub fn variable<V: Space>(binding: Binding<'_, V>) -> Variable<'_, V> {
    Variable { binding }
}
