use std::cell::RefCell;

use texpr::prelude::*;

#[test]
fn named_forwards_value_and_budget() {
    let sum = SimpleSpace::new(1) + SimpleSpace::new(2);
    let labelled = name("sum", sum.clone());
    assert_eq!(labelled.label(), "sum");
    assert_eq!(level_of(&labelled), level_of(&sum));
    assert_eq!(labelled.eval().unwrap(), sum.eval().unwrap());
    assert_eq!(labelled.render().unwrap(), "sum(L9):(1 + 2)");

    let leaf = name("leaf", SimpleSpace::new(7));
    assert_eq!(level_of(&leaf), DEFAULT_LEVEL);
    assert_eq!(leaf.render().unwrap(), "leaf(L10):7");
    assert_eq!(leaf.into_inner(), SimpleSpace::new(7));
}

#[test]
fn named_nodes_compose_like_their_inner_node() {
    let a = SimpleSpace::new(1);
    let plain = (a + a) + a;
    let labelled = name("x", a + a) + a;
    assert_eq!(level_of(&plain), level_of(&labelled));
    assert_eq!(plain.eval().unwrap(), labelled.eval().unwrap());
}

#[test]
fn aliased_variable_observes_updates() {
    let storage = RefCell::new(SimpleSpace::new(44));
    let var = Variable::aliased(&storage);
    assert!(var.mode().is_aliased());
    assert_eq!(var.eval().unwrap(), SimpleSpace::new(44));

    storage.borrow_mut().set_value(33);
    assert_eq!(var.eval().unwrap(), SimpleSpace::new(33));
    assert_eq!(var.render().unwrap(), "$33");
}

#[test]
fn shared_variable_is_a_snapshot() {
    let storage = RefCell::new(SimpleSpace::new(44));
    let var = Variable::shared(&*storage.borrow());
    assert!(var.mode().is_shared());

    storage.borrow_mut().set_value(33);
    assert_eq!(var.eval().unwrap(), SimpleSpace::new(44));
    assert_eq!(var.render().unwrap(), "$44");
}

#[test]
fn binding_modes_from_explicit_bindings() {
    let storage = RefCell::new(SimpleSpace::new(1));
    let aliased = variable(Binding::Aliased(&storage));
    let shared = variable(Binding::Shared(SimpleSpace::new(2)));
    assert_eq!(aliased.mode(), BindingMode::Aliased);
    assert_eq!(shared.mode(), BindingMode::Shared);
    assert_eq!(aliased.binding().mode().to_string(), "aliased");
    assert_eq!(shared.binding().mode().to_string(), "shared");
    assert_eq!((aliased + shared).eval().unwrap(), SimpleSpace::new(3));
}

#[test]
fn mutably_borrowed_storage_is_reported() {
    let storage = RefCell::new(SimpleSpace::new(1));
    let tree = SimpleSpace::new(2) + Variable::aliased(&storage);

    {
        let _guard = storage.borrow_mut();
        assert!(tree.eval().unwrap_err().is_binding_borrowed());
        assert!(tree.render().unwrap_err().is_binding_borrowed());
    }

    assert_eq!(tree.eval().unwrap(), SimpleSpace::new(3));
}

#[test]
fn variables_in_vector_spaces() {
    let storage = RefCell::new(VectorSpace::new([1, 2, 3]));
    let tree = VectorSpace::new([10, 20, 30]) + Variable::aliased(&storage);
    assert_eq!(tree.eval().unwrap(), VectorSpace::new([11, 22, 33]));

    *storage.borrow_mut() = VectorSpace::new([0, 0, 1]);
    assert_eq!(tree.eval().unwrap().values(), &[10, 20, 31]);
    assert_eq!(tree.render().unwrap(), "([10, 20, 30] + $[0, 0, 1])");
}
