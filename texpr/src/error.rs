use strum::EnumIs;
use thiserror::Error;

/// Runtime failures surfaced while evaluating or rendering an expression.
///
/// Composition itself never fails at runtime: operands whose value spaces do not
/// match are rejected by the type checker before any node exists.
#[derive(Debug, EnumIs, Error)]
pub enum ExpError {
    /// An erased handle was evaluated or rendered while holding no node.
    #[error(
        "Dereferenced an erased handle that is not bound to any node. Handles must be built from a node before they are evaluated or rendered."
    )]
    NullHandleDereference,

    /// The storage behind an aliased variable was mutably borrowed during evaluation.
    #[error(
        "The storage referenced by an aliased variable is mutably borrowed and cannot be read while the expression is evaluated."
    )]
    BindingBorrowed,

    /// The output sink refused part of a rendering.
    #[error("Failed to write the rendering of an expression: {0}")]
    Format(#[from] std::fmt::Error),

    /// The terminal or writer used by the pretty printer failed.
    #[error("I/O error while pretty printing an expression: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExpResult<T> = Result<T, ExpError>;
