use pretty_assertions::assert_eq;

use crate::runtime::Runtime;
use crate::value::{Coercible, Kind, Scalar, Value};

fn first_cell(array: &Value) -> Value {
    let Value::Array(body) = array else {
        unreachable!()
    };
    body.borrow().get(0).unwrap()
}

/// `$outer = [ [1] ]`
fn nested() -> (Value, Value, Value) {
    let inner = Value::array([Scalar::Int(1)]);
    let outer = Value::array([Scalar::Ref(inner.clone())]);
    let holder = Value::reference(&outer);
    (holder, outer, inner)
}

#[test]
fn test_depth_zero_shares_referent() {
    let (holder, outer, _) = nested();
    let copy = holder.clone_depth(0);

    assert!(!copy.ptr_eq(&holder));
    assert!(copy.referent().unwrap().ptr_eq(&outer));

    if let Value::Array(body) = &outer {
        body.borrow_mut().push(Scalar::Int(2));
    }
    let seen = copy.deref_array().unwrap().borrow().len();
    assert_eq!(seen, 2);
}

#[test]
fn test_depth_one_isolates_first_level_only() {
    let (holder, outer, inner) = nested();
    let copy = holder.clone_depth(1);
    let copied_outer = copy.referent().unwrap();

    assert!(!copied_outer.ptr_eq(&outer));
    first_cell(&outer).set(Scalar::Int(99)).unwrap();
    assert!(first_cell(&copied_outer).referent().unwrap().ptr_eq(&inner));

    // second level is still shared
    if let Value::Array(body) = &inner {
        body.borrow_mut().push(Scalar::Int(2));
    }
    let inner_len = first_cell(&copied_outer)
        .deref_array()
        .unwrap()
        .borrow()
        .len();
    assert_eq!(inner_len, 2);
}

#[test]
fn test_full_copy_isolates_everything() {
    let (holder, _, inner) = nested();
    let copy = holder.clone_depth(usize::MAX);
    let copied_inner = first_cell(&copy.referent().unwrap()).referent().unwrap();
    assert!(!copied_inner.ptr_eq(&inner));

    first_cell(&inner).set(Scalar::Int(7)).unwrap();
    assert_eq!(first_cell(&copied_inner).datum(), Some(Scalar::Int(1)));
}

#[test]
fn test_receiver_cells_are_always_copied() {
    let array = Value::array([Scalar::Int(1)]);
    let copy = array.clone_depth(0);
    first_cell(&array).set(Scalar::Int(5)).unwrap();
    assert_eq!(first_cell(&copy).datum(), Some(Scalar::Int(1)));
}

#[test]
fn test_self_reference_terminates_and_is_preserved() {
    let array = Value::empty_array();
    if let Value::Array(body) = &array {
        body.borrow_mut().push(Scalar::Ref(array.clone()));
    }
    let copy = array.clone_depth(usize::MAX);
    let back = first_cell(&copy).referent().unwrap();
    assert!(back.ptr_eq(&copy));
    assert!(!back.ptr_eq(&array));

    // break the cycles so the test does not leak
    first_cell(&array).set(Scalar::Undef).unwrap();
    first_cell(&copy).set(Scalar::Undef).unwrap();
}

#[test]
fn test_shared_substructure_stays_shared() {
    let leaf = Value::empty_hash();
    let pair = Value::array([Scalar::Ref(leaf.clone()), Scalar::Ref(leaf.clone())]);
    let copy = pair.clone_depth(usize::MAX);
    let Value::Array(body) = &copy else {
        unreachable!()
    };
    let body = body.borrow();
    let a = body.items()[0].referent().unwrap();
    let b = body.items()[1].referent().unwrap();
    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&leaf));
}

#[test]
fn test_clone_keeps_kind_definedness_and_class() {
    let mut rt = Runtime::new();
    let class = rt.symbols_mut().intern("Counter").unwrap();
    let hash = Value::hash([("n", Scalar::Int(3))]);
    let obj = Value::reference(&hash);
    obj.bless(class).unwrap();

    let copy = obj.clone_depth(usize::MAX);
    assert_eq!(copy.kind(), Kind::Scalar);
    assert!(copy.is_defined());
    assert_eq!(copy.blessed(), Some(class));
    assert_eq!(copy.ref_name(&rt), "Counter");

    let copied = copy.deref_hash().unwrap();
    assert_eq!(
        copied.borrow().get("n").and_then(|v| v.datum()),
        Some(Scalar::Int(3))
    );
    assert!(!Value::undef().clone_depth(3).is_defined());
    assert_eq!(Value::string("s").clone_depth(0).as_string(&rt), "s");
}

#[test]
fn test_deep_chain_does_not_overflow() {
    let mut head = Value::undef();
    for n in 0..50_000 {
        let node = Value::array([Scalar::Int(n)]);
        if let Value::Array(body) = &node {
            body.borrow_mut().push(Scalar::Ref(head.clone()));
        }
        head = Value::reference(&node);
    }
    let copy = head.clone_depth(usize::MAX);
    assert!(copy.is_reference());

    // release iteratively; recursive drop of a long Rc chain would overflow
    for chain in [head, copy] {
        let mut cursor = chain;
        while let Some(node) = cursor.referent() {
            let Value::Array(body) = &node else { break };
            let next = body.borrow_mut().pop();
            cursor.set(Scalar::Undef).unwrap();
            match next.and_then(|cell| cell.datum()) {
                Some(Scalar::Ref(target)) => cursor = target,
                _ => break,
            }
        }
    }
}
