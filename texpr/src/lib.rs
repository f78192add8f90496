//! Texpr: typed, lazily evaluated expression trees with a bounded embedding depth.
//!
//! Expressions are built by composing leaves (values of a [`Space`](space::Space)) with
//! binary operators. Every expression type carries a static composition budget. While the
//! budget lasts, operands are embedded by value in their parent: no allocation, no dynamic
//! dispatch. When it runs out, the composed node is moved behind a shared, type-erased
//! [`Erased`](erased::Erased) handle and the chain starts over with a fresh budget. Long
//! chains therefore neither nest generic types without bound nor pay for indirection on
//! every step.
//!
//! Building blocks
//!  - [`compose`](binary::compose) (or `+`) builds a sum node from any two expressions of
//!    the same value space.
//!  - [`name`](named::name) labels a node for rendering.
//!  - [`Variable`](variable::Variable) binds a leaf to caller-owned storage (aliased) or to
//!    a private copy (shared).
//!  - [`handle`](erased::handle) aliases an existing node without cloning it.
//!
//! Evaluation never fails except when an unbound erased handle is dereferenced; see
//! [`ExpError`](error::ExpError).
//!
//! Example
//! ```
//! use std::cell::RefCell;
//! use texpr::prelude::*;
//!
//! let a = SimpleSpace::new(500);
//! let storage = RefCell::new(SimpleSpace::new(44));
//! let b = Variable::aliased(&storage);
//!
//! let c = a + b;
//! let d = name("d", c + a);
//! assert_eq!(d.eval().unwrap(), SimpleSpace::new(1044));
//! assert_eq!(d.render().unwrap(), "d(L8):((500 + $44) + 500)");
//!
//! storage.borrow_mut().set_value(33);
//! assert_eq!(d.eval().unwrap(), SimpleSpace::new(1033));
//! ```

/// Binary nodes and the composition operator.
pub mod binary;
/// Type-level composition budgets.
pub mod budget;
/// Type erasure boundary and plain handles.
pub mod erased;
/// Error taxonomy.
pub mod error;
/// Core expression trait, views and rendering.
pub mod exp;
/// Structural statistics over trees.
pub mod inspect;
/// Labelled nodes.
pub mod named;
/// Colored, width-aware pretty printer.
pub mod pretty;
/// Value space contract.
pub mod space;
/// Example value spaces.
pub mod spaces;
/// Operand storage selection.
pub mod storage;
/// Aliased and shared variables.
pub mod variable;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - `Exp` trait with evaluation, rendering and erasure
    //! - Composition entry points and node types
    //! - Decorators and handles
    //! - Budgets and the example spaces
    pub use crate::binary::{Binary, Composed, Sum, SumOp, combine_expressions, compose};
    pub use crate::budget::{Budget, DEFAULT_LEVEL, DefaultBudget};
    pub use crate::erased::{DynExp, Erased, Handle, handle};
    pub use crate::error::{ExpError, ExpResult};
    pub use crate::exp::{Exp, ExpView, level_of};
    pub use crate::inspect::{TreeStats, stats};
    pub use crate::named::{Named, name};
    pub use crate::pretty::PrettyExp;
    pub use crate::space::Space;
    pub use crate::spaces::{SimpleSpace, VectorSpace};
    pub use crate::storage::{IntoOperand, Operand, StorageKind};
    pub use crate::variable::{Binding, BindingMode, Variable, variable};
}
