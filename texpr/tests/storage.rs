use std::fmt;

use texpr::budget::B0;
use texpr::prelude::*;

/// Leaf space whose variables are exhausted from the start.
#[derive(Clone, Debug, PartialEq)]
struct Tiny(u8);

impl fmt::Display for Tiny {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Space for Tiny {
    type Budget = B0;

    fn combine(&self, other: &Self) -> Self {
        Tiny(self.0.wrapping_add(other.0))
    }
}

texpr::space_ops!(Tiny);

#[test]
fn leaves_and_variables_are_embedded() {
    let a = SimpleSpace::new(1);
    let storage = std::cell::RefCell::new(SimpleSpace::new(2));

    let sum = a + Variable::aliased(&storage);
    assert_eq!(sum.storage(), (StorageKind::Embedded, StorageKind::Embedded));
    assert!(sum.lhs().kind().is_embedded());
    assert!(sum.rhs().kind().is_embedded());
}

#[test]
fn composed_operands_with_budget_are_embedded() {
    let a = SimpleSpace::new(1);
    let inner = a + a;
    let outer = inner + a;
    assert_eq!(outer.storage(), (StorageKind::Embedded, StorageKind::Embedded));
    assert_eq!(outer.lhs().level(), 9);
    assert_eq!(outer.rhs().level(), DEFAULT_LEVEL);
}

#[test]
fn erased_operands_stay_erased() {
    let a = SimpleSpace::new(1);
    let shared = (a + a).erase();

    let sum = compose(shared.clone(), a);
    assert_eq!(sum.storage(), (StorageKind::Erased, StorageKind::Embedded));
    assert_eq!(sum.lhs().level(), DEFAULT_LEVEL);
    assert_eq!(sum.eval().unwrap(), SimpleSpace::new(3));
    // The operand shares the node instead of copying it.
    assert_eq!(shared.share_count(), 2);
}

#[test]
fn exhausted_chain_switches_to_erased_storage() {
    let a = SimpleSpace::new(1);
    let x1 = a + a;
    let x2 = x1 + a;
    let x3 = x2 + a;
    let x4 = x3 + a;
    let x5 = x4 + a;
    let x6 = x5 + a;
    let x7 = x6 + a;
    let x8 = x7 + a;
    let x9 = x8 + a;
    assert_eq!(level_of(&x9), 1);
    assert_eq!(x9.storage(), (StorageKind::Embedded, StorageKind::Embedded));

    // Tenth composition: the node itself comes back behind an erased handle.
    let x10: Erased<'_, SimpleSpace> = x9 + a;
    assert_eq!(level_of(&x10), DEFAULT_LEVEL);
    assert_eq!(x10.inner_level(), Some(0));
    assert_eq!(x10.eval().unwrap(), SimpleSpace::new(11));

    // The chain starts over from the erased boundary.
    let x11 = x10 + a;
    assert_eq!(x11.storage(), (StorageKind::Erased, StorageKind::Embedded));
    assert_eq!(level_of(&x11), 9);
    assert_eq!(x11.eval().unwrap(), SimpleSpace::new(12));
}

#[test]
fn exhausted_operand_is_stored_erased() {
    let shared = Tiny(2);
    let var = Variable::shared(&shared);
    assert_eq!(level_of(&var), 0);

    let operand = var.into_operand();
    assert_eq!(operand.kind(), StorageKind::Erased);
    assert_eq!(operand.eval().unwrap(), Tiny(2));
}

#[test]
fn exhausted_space_erases_every_composition() {
    let sum = compose(Tiny(1), Variable::shared(&Tiny(2)));
    assert_eq!(level_of(&sum), DEFAULT_LEVEL);
    assert_eq!(sum.render().unwrap(), "@erased:(1 + @erased:$2)");
    assert_eq!(sum.eval().unwrap(), Tiny(3));

    let tree = stats(&sum).unwrap();
    assert_eq!(tree.erased, 2);
    assert_eq!(tree.binaries, 1);
    assert_eq!(tree.variables, 1);
}

#[test]
fn storage_kind_display() {
    assert_eq!(StorageKind::Embedded.to_string(), "embedded");
    assert_eq!(StorageKind::Erased.to_string(), "erased");
}

#[test]
fn composed_nodes_debug_format() {
    let a = SimpleSpace::new(1);
    let storage = std::cell::RefCell::new(SimpleSpace::new(2));
    let sum = a + Variable::aliased(&storage);
    let out = format!("{sum:?}");
    assert!(out.starts_with("Binary"));
    assert!(out.contains("Embedded(SimpleSpace(1))"));
    assert!(out.contains("Variable"));

    let mixed = compose((a + a).erase(), a);
    let out = format!("{mixed:?}");
    assert!(out.contains("Erased(Erased { bound: true, shares: 1 })"));
    assert!(out.contains("Embedded(SimpleSpace(1))"));
}

/// Leaf space without a `Debug` implementation.
#[derive(Clone)]
struct Opaque(u8);

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Space for Opaque {
    type Budget = DefaultBudget;

    fn combine(&self, other: &Self) -> Self {
        Opaque(self.0 ^ other.0)
    }
}

#[test]
fn erased_operands_debug_without_debug_values() {
    let sum = compose(Opaque(1).erase(), Opaque(2).erase());
    assert_eq!(sum.storage(), (StorageKind::Erased, StorageKind::Erased));
    let out = format!("{sum:?}");
    assert!(out.starts_with("Binary"));
    assert_eq!(out.matches("Erased(Erased { bound: true, shares: 1 })").count(), 2);
    assert_eq!(sum.render().unwrap(), "(@erased:#1 + @erased:#2)");
}
