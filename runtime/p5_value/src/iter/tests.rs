use pretty_assertions::assert_eq;

use crate::errors::ValueError;
use crate::runtime::Runtime;
use crate::value::{Coercible, Kind, Scalar, Value};

fn strings(rt: &Runtime, values: impl Iterator<Item = Value>) -> Vec<String> {
    values.map(|v| v.as_string(rt)).collect()
}

#[test]
fn test_array_in_index_order() {
    let rt = Runtime::new();
    let array = Value::array([Scalar::Int(3), Scalar::Int(1), Scalar::Int(2)]);
    assert_eq!(strings(&rt, array.members().unwrap()), vec!["3", "1", "2"]);
}

#[test]
fn test_array_members_are_aliases() {
    let array = Value::array([Scalar::Int(1), Scalar::Int(2)]);
    for cell in array.members().unwrap() {
        let doubled = match cell.datum() {
            Some(Scalar::Int(n)) => n * 2,
            _ => 0,
        };
        cell.set(Scalar::Int(doubled)).unwrap();
    }
    let rt = Runtime::new();
    assert_eq!(strings(&rt, array.members().unwrap()), vec!["2", "4"]);
}

#[test]
fn test_array_growth_is_observed_and_shrink_ends_early() {
    let array = Value::array([Scalar::Int(1)]);
    let Value::Array(body) = &array else {
        unreachable!()
    };

    let mut members = array.members().unwrap();
    assert!(members.next().is_some());
    body.borrow_mut().push(Scalar::Int(2));
    assert!(members.next().is_some());
    assert!(members.next().is_none());

    let mut members = array.members().unwrap();
    body.borrow_mut().clear();
    assert!(members.next().is_none());
}

#[test]
fn test_hash_yields_key_then_value() {
    let rt = Runtime::new();
    let hash = Value::hash([("k", Scalar::Int(7))]);
    assert_eq!(strings(&rt, hash.members().unwrap()), vec!["k", "7"]);
}

#[test]
fn test_hash_order_stable_while_unmutated() {
    let rt = Runtime::new();
    let hash = Value::hash((0..20).map(|n| (format!("key{n}"), Scalar::Int(n))));
    let first = strings(&rt, hash.members().unwrap());
    let second = strings(&rt, hash.members().unwrap());
    assert_eq!(first.len(), 40);
    assert_eq!(first, second);
}

#[test]
fn test_hash_deleted_keys_skipped_added_keys_ignored() {
    let rt = Runtime::new();
    let hash = Value::hash([("a", Scalar::Int(1)), ("b", Scalar::Int(2))]);
    let Value::Hash(body) = &hash else {
        unreachable!()
    };
    let mut members = hash.members().unwrap();
    let first_key = members.next().unwrap().as_string(&rt);
    let _value = members.next();

    let other = if first_key == "a" { "b" } else { "a" };
    body.borrow_mut().remove(other);
    body.borrow_mut().insert("c", Scalar::Int(3));
    assert!(members.next().is_none());
}

#[test]
fn test_non_container_rejected() {
    let err = Value::int(1).members().unwrap_err();
    assert_eq!(
        err,
        ValueError::KindMismatch {
            wanted: Kind::Array,
            found: Kind::Scalar
        }
    );
}
