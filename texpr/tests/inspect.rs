use std::cell::RefCell;

use texpr::prelude::*;

/// Apply `+ $leaf` once per listed token.
macro_rules! chain {
    ($start:expr; $leaf:expr; $($step:tt)*) => {{
        let acc = $start;
        $(
            let _ = stringify!($step);
            let acc = acc + $leaf;
        )*
        acc
    }};
}

#[test]
fn leaf_stats() {
    let tree = stats(&SimpleSpace::new(1)).unwrap();
    assert_eq!(
        tree,
        TreeStats {
            nodes: 1,
            leaves: 1,
            depth: 1,
            ..TreeStats::default()
        }
    );
}

#[test]
fn labelled_chain_stats() {
    let a = SimpleSpace::new(500);
    let storage = RefCell::new(SimpleSpace::new(44));
    let b = Variable::aliased(&storage);

    let c = a + b;
    let d = name("d", c + a);
    let e = name("e", d + a);
    let f = name("f", e + a);
    let g = name("g", f + a);
    let h = name("h", g + a);
    let i = name("i", h + a);
    let x = name("x", i + a);
    let y = name("y", x + a);
    let z = name("z", y + a);

    let tree = stats(&z).unwrap();
    assert_eq!(tree.binaries, 10);
    assert_eq!(tree.named, 9);
    assert_eq!(tree.erased, 1);
    assert_eq!(tree.leaves, 10);
    assert_eq!(tree.variables, 1);
    assert_eq!(tree.handles, 0);
    assert_eq!(tree.nodes, 31);
    assert_eq!(tree.depth, 21);
}

#[test]
fn twenty_compositions_cross_two_boundaries() {
    let a = SimpleSpace::new(3);
    let tree = chain!(a + a; a; 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20);

    assert_eq!(tree.eval().unwrap(), SimpleSpace::new(63));
    let counts = stats(&tree).unwrap();
    assert_eq!(counts.erased, 2);
    assert_eq!(counts.binaries, 20);
    assert_eq!(counts.leaves, 21);
}

#[test]
fn handles_are_counted() {
    let base = SimpleSpace::new(1) + SimpleSpace::new(2);
    let tree = handle(&base) + handle(&base);
    let counts = stats(&tree).unwrap();
    assert_eq!(counts.handles, 2);
    assert_eq!(counts.binaries, 3);
    assert_eq!(counts.leaves, 4);
    assert_eq!(counts.depth, 4);
}

#[test]
fn long_erased_chain_stats() {
    let a = SimpleSpace::new(1);
    let mut acc = a.erase();
    for _ in 0..1_000 {
        acc = (acc + a).erase();
    }
    let counts = stats(&acc).unwrap();
    assert_eq!(counts.erased, 1_001);
    assert_eq!(counts.leaves, 1_001);
    assert_eq!(counts.depth, 2 * 1_000 + 2);
}
