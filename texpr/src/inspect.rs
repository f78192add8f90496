//! Structural statistics over expression trees.
//!
//! Walks a tree through [`ExpView`] without recursion, so trees of any depth can be
//! inspected, including through erased handles.
use smallvec::SmallVec;

use crate::{
    erased::DynExp,
    error::ExpResult,
    exp::{Exp, ExpView},
    space::Space,
};

/// Node counts of an expression tree.
///
/// `depth` is the number of nodes on the longest root-to-leaf path; erased handles,
/// handles and labels count as nodes of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub binaries: usize,
    pub named: usize,
    pub variables: usize,
    pub erased: usize,
    pub handles: usize,
    pub depth: usize,
}

/// Collect [`TreeStats`] for `node`.
///
/// Fails only if an unbound erased handle is reached.
pub fn stats<E: Exp>(node: &E) -> ExpResult<TreeStats> {
    let root: &dyn DynExp<E::Value> = node;
    stats_dyn(root)
}

/// Same as [`stats`], for a node already behind the erasure interface.
pub fn stats_dyn<V: Space>(root: &dyn DynExp<V>) -> ExpResult<TreeStats> {
    let mut stats = TreeStats::default();
    let mut stack: SmallVec<[(&dyn DynExp<V>, usize); 16]> = SmallVec::new();
    stack.push((root, 1));

    while let Some((node, depth)) = stack.pop() {
        let view = node.dyn_view()?;
        stats.nodes += 1;
        stats.depth = stats.depth.max(depth);
        match &view {
            ExpView::Leaf(_) => stats.leaves += 1,
            ExpView::Binary { .. } => stats.binaries += 1,
            ExpView::Named { .. } => stats.named += 1,
            ExpView::Variable(_) => stats.variables += 1,
            ExpView::Erased(_) => stats.erased += 1,
            ExpView::Handle(_) => stats.handles += 1,
        }
        for child in view.children() {
            stack.push((child, depth + 1));
        }
    }

    Ok(stats)
}
