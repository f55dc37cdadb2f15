//! Prelude functions.

use std::cmp::Ordering;

use grove_value::errors::{
    arity_mismatch, division_by_zero, integer_overflow, malformed_form, type_mismatch,
};
use grove_value::{Bindings, EvalError, EvalResult, FunctionValue, Value};

pub(super) fn install(bindings: &mut Bindings) {
    let table: [(&str, fn(&[Value]) -> EvalResult); 17] = [
        ("+", add),
        ("-", sub),
        ("*", mul),
        ("/", div),
        ("mod", modulo),
        ("=", equal),
        ("<", less),
        (">", greater),
        ("<=", less_or_equal),
        (">=", greater_or_equal),
        ("not", not),
        ("make-vector", make_vector),
        ("make-hashmap", make_hashmap),
        ("make-hashset", make_hashset),
        ("get", get),
        ("contains?", contains),
        ("count", count),
    ];
    bindings.define("identity", Value::Function(FunctionValue::identity()));
    for (name, func) in table {
        bindings.define(name, Value::Function(FunctionValue::new(name, func)));
    }
}

// Arithmetic

/// A numeric operand. Int stays Int until a Float joins in.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn of(value: &Value) -> Result<Self, EvalError> {
        match value {
            Value::Int(n) => Ok(Number::Int(*n)),
            Value::Float(x) => Ok(Number::Float(*x)),
            other => Err(type_mismatch("number", other.type_name())),
        }
    }

    #[allow(
        clippy::cast_precision_loss,
        reason = "mixed Int/Float arithmetic promotes to Float"
    )]
    fn as_float(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Number::Int(n) => Value::Int(n),
            Number::Float(x) => Value::Float(x),
        }
    }

    fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_float().partial_cmp(&b.as_float()),
        }
    }
}

/// Fold `args` left to right with `int_op` while every operand is Int.
fn fold(
    name: &str,
    args: &[Value],
    int_op: fn(i64, i64) -> Result<i64, EvalError>,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult {
    let Some((first, rest)) = args.split_first() else {
        return Err(arity_mismatch(name, 1, 0));
    };
    let mut acc = Number::of(first)?;
    for arg in rest {
        acc = match (acc, Number::of(arg)?) {
            (Number::Int(a), Number::Int(b)) => Number::Int(int_op(a, b)?),
            (a, b) => Number::Float(float_op(a.as_float(), b.as_float())),
        };
    }
    Ok(acc.into_value())
}

fn add(args: &[Value]) -> EvalResult {
    if args.is_empty() {
        return Ok(Value::Int(0));
    }
    fold(
        "+",
        args,
        |a, b| a.checked_add(b).ok_or_else(|| integer_overflow("addition")),
        |a, b| a + b,
    )
}

fn sub(args: &[Value]) -> EvalResult {
    if let [only] = args {
        return match Number::of(only)? {
            Number::Int(n) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("negation")),
            Number::Float(x) => Ok(Value::Float(-x)),
        };
    }
    fold(
        "-",
        args,
        |a, b| a.checked_sub(b).ok_or_else(|| integer_overflow("subtraction")),
        |a, b| a - b,
    )
}

fn mul(args: &[Value]) -> EvalResult {
    if args.is_empty() {
        return Ok(Value::Int(1));
    }
    fold(
        "*",
        args,
        |a, b| a.checked_mul(b).ok_or_else(|| integer_overflow("multiplication")),
        |a, b| a * b,
    )
}

/// Int division truncates toward zero.
fn div(args: &[Value]) -> EvalResult {
    if args.len() < 2 {
        return Err(arity_mismatch("/", 2, args.len()));
    }
    fold(
        "/",
        args,
        |a, b| {
            if b == 0 {
                return Err(division_by_zero());
            }
            a.checked_div(b).ok_or_else(|| integer_overflow("division"))
        },
        |a, b| a / b,
    )
}

/// Floored modulo: the result takes the sign of the divisor.
///
/// `(mod a b c)` is `(mod (mod a b) c)`.
fn modulo(args: &[Value]) -> EvalResult {
    let Some((first, rest)) = args.split_first() else {
        return Err(arity_mismatch("mod", 1, 0));
    };
    let mut acc = Number::of(first)?;
    for arg in rest {
        acc = match (acc, Number::of(arg)?) {
            (_, Number::Int(0)) => return Err(division_by_zero()),
            (Number::Int(a), Number::Int(b)) => {
                // i64::MIN rem -1 overflows but is mathematically 0.
                let r = a.checked_rem(b).unwrap_or(0);
                Number::Int(if r != 0 && (r < 0) != (b < 0) { r + b } else { r })
            }
            (a, b) => {
                let (a, b) = (a.as_float(), b.as_float());
                if b == 0.0 {
                    return Err(division_by_zero());
                }
                let r = a % b;
                Number::Float(if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r })
            }
        };
    }
    Ok(acc.into_value())
}

// Comparison

fn equal(args: &[Value]) -> EvalResult {
    let Some((first, rest)) = args.split_first() else {
        return Err(arity_mismatch("=", 1, 0));
    };
    let same = rest.iter().all(|other| values_equal(first, other));
    Ok(Value::Bool(same))
}

/// Numbers compare across Int and Float; everything else structurally.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (Number::of(a), Number::of(b)) {
        (Ok(x), Ok(y)) => x.compare(y) == Some(Ordering::Equal),
        _ => a == b,
    }
}

fn chain(name: &str, args: &[Value], holds: fn(Ordering) -> bool) -> EvalResult {
    if args.is_empty() {
        return Err(arity_mismatch(name, 1, 0));
    }
    let numbers = args.iter().map(Number::of).collect::<Result<Vec<_>, _>>()?;
    let ordered = numbers
        .windows(2)
        .all(|pair| pair[0].compare(pair[1]).is_some_and(holds));
    Ok(Value::Bool(ordered))
}

fn less(args: &[Value]) -> EvalResult {
    chain("<", args, Ordering::is_lt)
}

fn greater(args: &[Value]) -> EvalResult {
    chain(">", args, Ordering::is_gt)
}

fn less_or_equal(args: &[Value]) -> EvalResult {
    chain("<=", args, Ordering::is_le)
}

fn greater_or_equal(args: &[Value]) -> EvalResult {
    chain(">=", args, Ordering::is_ge)
}

fn not(args: &[Value]) -> EvalResult {
    match args {
        [value] => Ok(Value::Bool(!value.is_truthy())),
        _ => Err(arity_mismatch("not", 1, args.len())),
    }
}

// Collections

fn make_vector(args: &[Value]) -> EvalResult {
    Ok(Value::vector(args.to_vec()))
}

/// Later duplicates of a key replace earlier ones in place.
fn make_hashmap(args: &[Value]) -> EvalResult {
    if args.len() % 2 != 0 {
        return Err(malformed_form(
            "make-hashmap",
            "expects an even number of arguments",
        ));
    }
    let mut entries: Vec<(Value, Value)> = Vec::with_capacity(args.len() / 2);
    for pair in args.chunks_exact(2) {
        let (key, value) = (&pair[0], &pair[1]);
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.clone(),
            None => entries.push((key.clone(), value.clone())),
        }
    }
    Ok(Value::map(entries))
}

fn make_hashset(args: &[Value]) -> EvalResult {
    Ok(Value::set(args.to_vec()))
}

/// Look `key` up in a collection. `Ok(None)` when absent.
///
/// Vectors are indexed by Int, maps by any key, and a set yields the
/// member equal to `key`; nil holds nothing.
pub(super) fn lookup(collection: &Value, key: &Value) -> Result<Option<Value>, EvalError> {
    match collection {
        Value::Map(entries) => Ok(entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())),
        Value::Set(items) => Ok(items.iter().find(|item| *item == key).cloned()),
        Value::Vector(items) => match key {
            Value::Int(index) => Ok(usize::try_from(*index)
                .ok()
                .and_then(|i| items.get(i))
                .cloned()),
            other => Err(type_mismatch("int", other.type_name())),
        },
        Value::Nil => Ok(None),
        other => Err(type_mismatch("collection", other.type_name())),
    }
}

fn get(args: &[Value]) -> EvalResult {
    match args {
        [collection, key] => Ok(lookup(collection, key)?.unwrap_or(Value::Nil)),
        [collection, key, default] => {
            Ok(lookup(collection, key)?.unwrap_or_else(|| default.clone()))
        }
        _ => Err(arity_mismatch("get", 2, args.len())),
    }
}

/// `(contains? coll x)`: map keys, set members and vector elements.
fn contains(args: &[Value]) -> EvalResult {
    let [collection, element] = args else {
        return Err(arity_mismatch("contains?", 2, args.len()));
    };
    let found = match collection {
        Value::Map(entries) => entries.iter().any(|(k, _)| k == element),
        Value::Set(items) | Value::Vector(items) => items.contains(element),
        Value::Nil => false,
        other => return Err(type_mismatch("collection", other.type_name())),
    };
    Ok(Value::Bool(found))
}

fn count(args: &[Value]) -> EvalResult {
    let [collection] = args else {
        return Err(arity_mismatch("count", 1, args.len()));
    };
    let len = match collection {
        Value::Vector(items) | Value::Set(items) => items.len(),
        Value::Map(entries) => entries.len(),
        Value::Str(s) => s.chars().count(),
        Value::Nil => 0,
        other => return Err(type_mismatch("collection", other.type_name())),
    };
    i64::try_from(len)
        .map(Value::Int)
        .map_err(|_| integer_overflow("count"))
}
