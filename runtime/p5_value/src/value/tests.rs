use pretty_assertions::assert_eq;

use super::*;
use crate::runtime::{Runtime, Warning, WarningSink};

fn warning_runtime() -> Runtime {
    Runtime::builder()
        .warnings(true)
        .warning_sink(WarningSink::buffer())
        .build()
}

// Kinds

#[test]
fn test_kind_names() {
    assert_eq!(Kind::Handle.name(), "IO");
    assert_eq!(Kind::Regex.to_string(), "Regexp");
    assert_eq!(Kind::Array.with_article(), "an ARRAY");
    assert_eq!(Kind::Hash.with_article(), "a HASH");
}

#[test]
fn test_factories_report_kind() {
    assert_eq!(Value::undef().kind(), Kind::Scalar);
    assert_eq!(Value::empty_array().kind(), Kind::Array);
    assert_eq!(Value::empty_hash().kind(), Kind::Hash);
    assert_eq!(Value::code_stub("main::f").kind(), Kind::Code);
    assert_eq!(Value::glob("main", "STDOUT").kind(), Kind::Glob);
    assert_eq!(Value::handle("STDOUT").kind(), Kind::Handle);
}

#[test]
fn test_clone_aliases_and_set_is_visible() {
    let a = Value::int(1);
    let alias = a.clone();
    alias.set(Scalar::Int(2)).unwrap();
    assert!(a.ptr_eq(&alias));
    assert_eq!(a.datum(), Some(Scalar::Int(2)));
}

#[test]
fn test_set_on_container_is_kind_mismatch() {
    let err = Value::empty_array().set(Scalar::Int(1)).unwrap_err();
    assert_eq!(
        err,
        crate::ValueError::KindMismatch {
            wanted: Kind::Scalar,
            found: Kind::Array
        }
    );
}

#[test]
fn test_debug_does_not_recurse_through_cycles() {
    let array = Value::empty_array();
    if let Value::Array(body) = &array {
        body.borrow_mut().push(Scalar::Ref(array.clone()));
    }
    let text = format!("{array:?}");
    assert!(text.starts_with("ARRAY@0x"));

    let cell = Value::undef();
    cell.set(Scalar::Ref(cell.clone())).unwrap();
    assert!(format!("{cell:?}").starts_with("Scalar(Ref(SCALAR@0x"));
}

// Position

#[test]
fn test_pos_unset_versus_zero() {
    let v = Value::string("abc");
    assert_eq!(v.get_pos(), POS_UNSET);
    assert_eq!(v.get_pos_flagged(), (POS_UNSET, false));

    v.set_pos(Some(0));
    assert_eq!(v.get_pos_flagged(), (0, true));

    v.set(Scalar::from("xyz")).unwrap();
    assert_eq!(v.get_pos_flagged(), (POS_UNSET, false));
}

// Coercion

#[test]
fn test_string_forms() {
    let rt = Runtime::new();
    assert_eq!(Value::int(-42).as_string(&rt), "-42");
    assert_eq!(Value::float(0.1).as_string(&rt), "0.1");
    assert_eq!(Value::float(1e20).as_string(&rt), "1e+20");
    assert_eq!(Value::float(f64::INFINITY).as_string(&rt), "Inf");
    assert_eq!(Value::array([Scalar::Int(1), Scalar::Int(2)]).as_string(&rt), "2");
    assert_eq!(Value::glob("main", "foo").as_string(&rt), "*main::foo");
}

#[test]
fn test_reference_string_forms() {
    let mut rt = Runtime::new();
    let hash = Value::empty_hash();
    let r = Value::reference(&hash);
    assert_eq!(r.as_string(&rt), format!("HASH({:#x})", hash.addr()));

    let inner = Value::reference(&Value::int(1));
    let ref_ref = Value::reference(&inner);
    assert!(ref_ref.as_string(&rt).starts_with("REF(0x"));

    let class = rt.symbols_mut().intern("Point").unwrap();
    r.bless(class).unwrap();
    assert_eq!(r.as_string(&rt), format!("Point=HASH({:#x})", hash.addr()));
    assert_eq!(r.as_integer(&rt), i64::try_from(hash.addr()).unwrap_or(0));
}

#[test]
fn test_numeric_forms() {
    let rt = Runtime::new();
    assert_eq!(Value::string("  12abc").as_integer(&rt), 12);
    assert_eq!(Value::string("3.7").as_integer(&rt), 3);
    assert_eq!(Value::string("-3.7").as_integer(&rt), -3);
    assert_eq!(Value::string("abc").as_float(&rt), 0.0);
    assert_eq!(Value::float(2.5).as_float(&rt), 2.5);
    let hash = Value::hash([("a", Scalar::Int(1)), ("b", Scalar::Int(2))]);
    assert_eq!(hash.as_integer(&rt), 2);
}

#[test]
fn test_numeric_read_does_not_rewrite_content() {
    let rt = Runtime::new();
    let v = Value::string("12abc");
    assert_eq!(v.as_integer(&rt), 12);
    assert_eq!(v.datum(), Some(Scalar::from("12abc")));
    assert_eq!(v.as_string(&rt), "12abc");
}

#[test]
fn test_boolean_law() {
    assert!(!Value::undef().as_boolean());
    assert!(!Value::string("").as_boolean());
    assert!(!Value::string("0").as_boolean());
    assert!(!Value::string("0.0").as_boolean());
    assert!(!Value::string("abc").as_boolean());
    assert!(!Value::int(0).as_boolean());
    assert!(!Value::float(0.0).as_boolean());
    assert!(!Value::empty_array().as_boolean());

    assert!(!Value::string("0x1").as_boolean());

    assert!(Value::string("1").as_boolean());
    assert!(Value::float(f64::NAN).as_boolean());
    assert!(Value::reference(&Value::undef()).as_boolean());
    assert!(Value::array([Scalar::Undef]).as_boolean());
    assert!(Value::code_stub("main::f").as_boolean());
}

#[test]
fn test_string_length_counts_characters() {
    let rt = warning_runtime();
    assert_eq!(Value::string("héllo").string_length(&rt), 5);
    assert_eq!(Value::int(-10).string_length(&rt), 3);
    assert_eq!(Value::undef().string_length(&rt), 0);
    assert!(rt.warning_sink().captured().is_empty());
}

#[test]
fn test_coercion_warnings() {
    let rt = warning_runtime();
    assert_eq!(Value::undef().as_string(&rt), "");
    assert_eq!(Value::undef().as_integer(&rt), 0);
    assert_eq!(Value::string("7 dwarves").as_integer(&rt), 7);
    assert_eq!(Value::string("42").as_integer(&rt), 42);
    assert!(!Value::undef().as_boolean());
    assert_eq!(
        rt.warning_sink().captured(),
        vec![
            Warning::Uninitialized { op: "string" },
            Warning::Uninitialized { op: "numeric" },
            Warning::NonNumeric {
                text: "7 dwarves".to_string()
            },
        ]
    );
}

#[test]
fn test_warnings_disabled_by_default() {
    let rt = Runtime::builder().warning_sink(WarningSink::buffer()).build();
    assert_eq!(Value::undef().as_string(&rt), "");
    assert!(rt.warning_sink().captured().is_empty());
}

#[test]
fn test_as_scalar() {
    let array = Value::array([Scalar::Int(5), Scalar::Int(6), Scalar::Int(7)]);
    assert_eq!(array.as_scalar().datum(), Some(Scalar::Int(3)));

    let s = Value::string("x");
    let copy = s.as_scalar();
    assert!(!copy.ptr_eq(&s));
    assert_eq!(copy.datum(), Some(Scalar::from("x")));

    let code = Value::code_stub("main::f");
    assert!(code.as_scalar().referent().is_some_and(|target| target.ptr_eq(&code)));
}

// List assignment

#[test]
fn test_assign_iter_scalar_keeps_last() {
    let rt = Runtime::new();
    let target = Value::undef();
    let consumed = target
        .assign_iter(&rt, [Value::int(1), Value::int(2), Value::int(3)])
        .unwrap();
    assert_eq!(consumed, 3);
    assert_eq!(target.datum(), Some(Scalar::Int(3)));

    let consumed = target.assign_iter(&rt, []).unwrap();
    assert_eq!(consumed, 0);
    assert_eq!(target.datum(), Some(Scalar::Undef));
}

#[test]
fn test_assign_iter_array_copies_in_order() {
    let rt = Runtime::new();
    let source = Value::string("b");
    let array = Value::array([Scalar::Int(9)]);
    let consumed = array
        .assign_iter(&rt, [Value::string("a"), source.clone()])
        .unwrap();
    assert_eq!(consumed, 2);

    let Value::Array(body) = &array else {
        unreachable!()
    };
    let items: Vec<_> = body.borrow().items().iter().map(Value::datum).collect();
    assert_eq!(items, vec![Some(Scalar::from("a")), Some(Scalar::from("b"))]);

    // elements are fresh cells, not aliases of the source
    source.set(Scalar::from("changed")).unwrap();
    assert_eq!(body.borrow().items()[1].datum(), Some(Scalar::from("b")));
}

#[test]
fn test_assign_iter_array_from_itself() {
    let rt = Runtime::new();
    let array = Value::array([Scalar::Int(1), Scalar::Int(2)]);
    let Value::Array(body) = &array else {
        unreachable!()
    };
    let mut items: Vec<Value> = body.borrow().items().to_vec();
    items.push(Value::int(3));
    array.assign_iter(&rt, items).unwrap();
    assert_eq!(body.borrow().len(), 3);
}

#[test]
fn test_assign_iter_hash_pairs_and_odd_count() {
    let rt = warning_runtime();
    let hash = Value::hash([("old", Scalar::Int(0))]);
    let consumed = hash
        .assign_iter(&rt, [Value::string("a"), Value::int(1), Value::string("b")])
        .unwrap();
    assert_eq!(consumed, 3);

    let Value::Hash(body) = &hash else {
        unreachable!()
    };
    let body = body.borrow();
    assert!(!body.contains_key("old"));
    assert_eq!(body.get("a").and_then(|v| v.datum()), Some(Scalar::Int(1)));
    assert_eq!(body.get("b").and_then(|v| v.datum()), Some(Scalar::Undef));
    assert_eq!(rt.warning_sink().captured(), vec![Warning::OddHashAssignment]);
}

#[test]
fn test_assign_iter_rejects_code() {
    let rt = Runtime::new();
    let err = Value::code_stub("main::f")
        .assign_iter(&rt, [Value::int(1)])
        .unwrap_err();
    assert!(err.is_kind_mismatch());
}

// Undef

#[test]
fn test_undef_scalar_in_place() {
    let mut v = Value::string("x");
    let alias = v.clone();
    v.undefine();
    assert!(!alias.is_defined());
    assert!(v.ptr_eq(&alias));
}

#[test]
fn test_undef_container_rebinds_and_payload_survives() {
    let mut v = Value::array([Scalar::Int(1)]);
    let other_holder = v.clone();
    v.undefine();
    assert_eq!(v.kind(), Kind::Scalar);
    assert!(!v.is_defined());
    assert_eq!(other_holder.kind(), Kind::Array);
    assert!(other_holder.as_boolean());
}

// Bodies

#[test]
fn test_array_element_extends() {
    let mut body = ArrayBody::default();
    let cell = body.element(2);
    assert_eq!(body.len(), 3);
    cell.set(Scalar::Int(5)).unwrap();
    assert_eq!(body.get(2).and_then(|v| v.datum()), Some(Scalar::Int(5)));
    assert!(body.get(0).is_some_and(|v| !v.is_defined()));
}

#[test]
fn test_hash_element_is_stable() {
    let mut body = HashBody::default();
    let first = body.element("k");
    let second = body.element("k");
    assert!(first.ptr_eq(&second));
    assert_eq!(body.len(), 1);
}

#[test]
fn test_code_call() {
    fn double(rt: &Runtime, args: &[Value]) -> crate::ValueResult<Value> {
        let n = args.first().map_or(0, |v| v.as_integer(rt));
        Ok(Value::int(n * 2))
    }

    let rt = Runtime::new();
    let Value::Code(code) = Value::code("main::double", double) else {
        unreachable!()
    };
    let result = code.borrow().call(&rt, &[Value::int(21)]);
    assert_eq!(result.map(|v| v.datum()), Ok(Some(Scalar::Int(42))));

    let Value::Code(stub) = Value::code_stub("main::missing") else {
        unreachable!()
    };
    assert_eq!(
        stub.borrow().call(&rt, &[]).map(|v| v.datum()),
        Err(crate::ValueError::UndefinedSubroutine {
            name: "main::missing".to_string()
        })
    );
}

#[test]
fn test_glob_slots_vivify_once() {
    let mut glob = GlobBody::default();
    let first = glob.vivify_array();
    let second = glob.vivify_array();
    assert!(first.ptr_eq(&second));
    assert!(glob.slots().hash.is_none());
}
