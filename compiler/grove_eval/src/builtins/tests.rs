use super::*;
use grove_value::{BuiltinRegistry, EvalErrorKind, EvalResult, Value};
use pretty_assertions::assert_eq;

fn call(name: &str, args: &[Value]) -> EvalResult {
    match prelude().get(name) {
        Some(Value::Function(func)) => func.call(args),
        other => panic!("{name} is not a prelude function: {other:?}"),
    }
}

fn fault(result: EvalResult) -> EvalErrorKind {
    match result {
        Err(err) => err.kind,
        Ok(value) => panic!("expected a fault, got {value}"),
    }
}

#[test]
fn prelude_binds_functions_and_macros() {
    let globals = prelude();
    for name in [
        "identity",
        "+",
        "mod",
        "<=",
        ">=",
        "get",
        "contains?",
        "make-vector",
        "make-hashset",
    ] {
        assert!(
            matches!(globals.get(name), Some(Value::Function(_))),
            "{name}"
        );
    }
    for name in [
        "if", "def", "let", "fn", "defn", "and", "or", "cond", "comment", "map", "filter", "->",
        "->>",
    ] {
        assert!(matches!(globals.get(name), Some(Value::Macro(_))), "{name}");
    }
}

#[test]
fn int_arithmetic_stays_int() {
    assert_eq!(call("+", &[Value::Int(2), Value::Int(3)]), Ok(Value::Int(5)));
    assert_eq!(call("-", &[Value::Int(2), Value::Int(3)]), Ok(Value::Int(-1)));
    assert_eq!(call("-", &[Value::Int(4)]), Ok(Value::Int(-4)));
    assert_eq!(call("*", &[]), Ok(Value::Int(1)));
    assert_eq!(call("+", &[]), Ok(Value::Int(0)));
    assert_eq!(call("/", &[Value::Int(7), Value::Int(2)]), Ok(Value::Int(3)));
}

#[test]
fn float_operand_promotes() {
    assert_eq!(
        call("+", &[Value::Int(1), Value::Float(0.5)]),
        Ok(Value::Float(1.5))
    );
    assert_eq!(
        call("/", &[Value::Float(1.0), Value::Int(4)]),
        Ok(Value::Float(0.25))
    );
}

#[test]
fn arithmetic_faults() {
    assert_eq!(
        fault(call("/", &[Value::Int(1), Value::Int(0)])),
        EvalErrorKind::DivisionByZero
    );
    assert_eq!(
        fault(call("+", &[Value::Int(i64::MAX), Value::Int(1)])),
        EvalErrorKind::IntegerOverflow {
            operation: "addition".into()
        }
    );
    assert_eq!(
        fault(call("-", &[Value::Int(i64::MIN)])),
        EvalErrorKind::IntegerOverflow {
            operation: "negation".into()
        }
    );
    assert_eq!(
        fault(call("+", &[Value::Int(1), Value::string("a")])),
        EvalErrorKind::TypeMismatch {
            expected: "number".into(),
            got: "string".into()
        }
    );
    assert_eq!(
        fault(call("/", &[Value::Int(1)])),
        EvalErrorKind::ArityMismatch {
            name: "/".into(),
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn comparisons_chain() {
    let ints = |ns: &[i64]| ns.iter().copied().map(Value::Int).collect::<Vec<_>>();
    assert_eq!(call("<", &ints(&[1, 2, 3])), Ok(Value::Bool(true)));
    assert_eq!(call("<", &ints(&[1, 3, 2])), Ok(Value::Bool(false)));
    assert_eq!(call(">", &ints(&[3, 2, 1])), Ok(Value::Bool(true)));
    assert_eq!(call("=", &[Value::Int(1), Value::Float(1.0)]), Ok(Value::Bool(true)));
    assert_eq!(
        call("=", &[Value::keyword("a"), Value::keyword("a")]),
        Ok(Value::Bool(true))
    );
    assert_eq!(call("not", &[Value::Nil]), Ok(Value::Bool(true)));
}

#[test]
fn hashmap_lookup() {
    let map = match call(
        "make-hashmap",
        &[Value::keyword("a"), Value::Int(1), Value::keyword("a"), Value::Int(2)],
    ) {
        Ok(map) => map,
        Err(err) => panic!("{err}"),
    };
    assert_eq!(map.to_string(), "{:a 2}");
    assert_eq!(
        call("get", &[map.clone(), Value::keyword("a")]),
        Ok(Value::Int(2))
    );
    assert_eq!(call("get", &[map.clone(), Value::keyword("b")]), Ok(Value::Nil));
    assert_eq!(
        call("get", &[map, Value::keyword("b"), Value::Int(0)]),
        Ok(Value::Int(0))
    );
    assert_eq!(
        fault(call("make-hashmap", &[Value::Int(1)])),
        EvalErrorKind::MalformedForm {
            form: "make-hashmap".into(),
            message: "expects an even number of arguments".into()
        }
    );
}

#[test]
fn vector_lookup_and_count() {
    let v = Value::vector(vec![Value::Int(10), Value::Int(20)]);
    assert_eq!(call("get", &[v.clone(), Value::Int(1)]), Ok(Value::Int(20)));
    assert_eq!(call("get", &[v.clone(), Value::Int(-1)]), Ok(Value::Nil));
    assert_eq!(call("count", &[v]), Ok(Value::Int(2)));
    assert_eq!(call("count", &[Value::string("héllo")]), Ok(Value::Int(5)));
    assert_eq!(call("count", &[Value::Nil]), Ok(Value::Int(0)));
}

#[test]
fn keyword_registry_takes_keyword_last() {
    let map = Value::map(vec![(Value::keyword("k"), Value::Int(9))]);
    let registry = KeywordRegistry;

    assert_eq!(
        registry.dispatch(&[map.clone(), Value::keyword("k")]),
        Ok(Value::Int(9))
    );
    assert_eq!(
        registry.dispatch(&[map.clone(), Value::Int(0), Value::keyword("x")]),
        Ok(Value::Int(0))
    );
    assert_eq!(
        fault(registry.dispatch(&[Value::keyword("k")])),
        EvalErrorKind::ArityMismatch {
            name: ":k".into(),
            expected: 1,
            got: 0
        }
    );
    assert_eq!(
        fault(registry.dispatch(&[map, Value::Int(1)])),
        EvalErrorKind::TypeMismatch {
            expected: "keyword".into(),
            got: "int".into()
        }
    );
}

#[test]
fn modulo_is_floored() {
    let ints = |a: i64, b: i64| call("mod", &[Value::Int(a), Value::Int(b)]);
    assert_eq!(ints(7, 3), Ok(Value::Int(1)));
    assert_eq!(ints(-7, 3), Ok(Value::Int(2)));
    assert_eq!(ints(7, -3), Ok(Value::Int(-2)));
    assert_eq!(ints(i64::MIN, -1), Ok(Value::Int(0)));
    assert_eq!(
        call("mod", &[Value::Int(17), Value::Int(5), Value::Int(2)]),
        Ok(Value::Int(0))
    );
    assert_eq!(
        call("mod", &[Value::Float(-1.5), Value::Int(1)]),
        Ok(Value::Float(0.5))
    );
    assert_eq!(fault(ints(1, 0)), EvalErrorKind::DivisionByZero);
}

#[test]
fn inclusive_comparisons() {
    let ints = |ns: &[i64]| ns.iter().copied().map(Value::Int).collect::<Vec<_>>();
    assert_eq!(call("<=", &ints(&[1, 1, 2])), Ok(Value::Bool(true)));
    assert_eq!(call("<=", &ints(&[2, 1])), Ok(Value::Bool(false)));
    assert_eq!(call(">=", &ints(&[3, 3, 1])), Ok(Value::Bool(true)));
    assert_eq!(call(">=", &ints(&[1, 2])), Ok(Value::Bool(false)));
}

#[test]
fn hashsets_and_membership() {
    let set = match call(
        "make-hashset",
        &[Value::Int(1), Value::keyword("a"), Value::Int(1)],
    ) {
        Ok(set) => set,
        Err(err) => panic!("{err}"),
    };
    assert_eq!(set.to_string(), "#{1 :a}");
    assert_eq!(call("count", &[set.clone()]), Ok(Value::Int(2)));
    assert_eq!(
        call("contains?", &[set.clone(), Value::keyword("a")]),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        call("get", &[set.clone(), Value::Int(1)]),
        Ok(Value::Int(1))
    );
    assert_eq!(call("get", &[set, Value::Int(2)]), Ok(Value::Nil));

    let map = Value::map(vec![(Value::keyword("k"), Value::Nil)]);
    assert_eq!(
        call("contains?", &[map, Value::keyword("k")]),
        Ok(Value::Bool(true))
    );
    let v = Value::vector(vec![Value::Int(5)]);
    assert_eq!(
        call("contains?", &[v, Value::Int(0)]),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        fault(call("contains?", &[Value::Int(1), Value::Int(1)])),
        EvalErrorKind::TypeMismatch {
            expected: "collection".into(),
            got: "int".into()
        }
    );
}
