//! Runtime values for the Grove evaluator.
//!
//! # Heap Enforcement
//!
//! Shared payloads live in `Heap<T>`, whose constructors are private to this
//! module. Heap values are built through the factory methods on `Value`:
//!
//! ```text
//! let s = Value::string("hello");           // OK
//! let v = Value::vector(vec![Value::Int(1)]); // OK
//! let s = Value::Str(Heap::new(..));        // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Evaluator-Relevant Shape
//!
//! The evaluator only inspects `Nil`, `Function`, `Macro`, `Keyword`,
//! `Undefined` and `Exception`. The remaining variants are data for the
//! prelude and for hosts.

mod exception;
mod function;
mod heap;

use std::fmt;

use grove_ir::Position;

use crate::errors::EvalError;

pub use exception::ExceptionValue;
pub use function::{FunctionValue, MacroFn, MacroValue, NativeFn, WeakFunctionValue};
pub use heap::Heap;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// Result of an empty tree.
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<str>),
    /// Keyword tag, stored without its leading `:`.
    ///
    /// In call position (or as a computed head) it is dispatched through the
    /// builtin registry instead of being invoked.
    Keyword(Heap<str>),
    Vector(Heap<Vec<Value>>),
    /// Association map with insertion order preserved.
    Map(Heap<Vec<(Value, Value)>>),
    /// Distinct values in first-insertion order.
    Set(Heap<Vec<Value>>),
    Function(FunctionValue),
    Macro(MacroValue),
    /// Marker bound to identifier tokens the lexer could not resolve.
    ///
    /// Such identifiers must be resolved against the environment at
    /// evaluation time; failing that is a `NotFoundInContext` fault.
    Undefined(Heap<str>),
    /// A fault carried as a value.
    Exception(Heap<ExceptionValue>),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn string(s: &str) -> Self {
        Value::Str(Heap::of_str(s))
    }

    /// Create a keyword; a leading `:` is stripped.
    #[inline]
    pub fn keyword(name: &str) -> Self {
        Value::Keyword(Heap::of_str(name.strip_prefix(':').unwrap_or(name)))
    }

    #[inline]
    pub fn vector(items: Vec<Value>) -> Self {
        Value::Vector(Heap::new(items))
    }

    #[inline]
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Value::Map(Heap::new(entries))
    }

    /// Create a set; later duplicates are dropped.
    pub fn set(items: Vec<Value>) -> Self {
        let mut distinct: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if !distinct.contains(&item) {
                distinct.push(item);
            }
        }
        Value::Set(Heap::new(distinct))
    }

    #[inline]
    pub fn undefined(name: &str) -> Self {
        Value::Undefined(Heap::of_str(name))
    }

    #[inline]
    pub fn function(func: FunctionValue) -> Self {
        Value::Function(func)
    }

    #[inline]
    pub fn macro_value(mac: MacroValue) -> Self {
        Value::Macro(mac)
    }

    /// Wrap a fault and its position into an exception value.
    #[inline]
    pub fn exception(error: EvalError, position: Position) -> Self {
        Value::Exception(Heap::new(ExceptionValue::new(error, position)))
    }

    /// Wrap a fault at its own position, or `(UNK, 1, 1)` if it has none.
    #[inline]
    pub fn captured(error: EvalError) -> Self {
        Value::Exception(Heap::new(ExceptionValue::capture(error)))
    }
}

// Value Methods

impl Value {
    /// Only `nil` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    #[inline]
    pub fn is_exception(&self) -> bool {
        matches!(self, Value::Exception(_))
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_exception(&self) -> Option<&ExceptionValue> {
        match self {
            Value::Exception(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Keyword(_) => "keyword",
            Value::Vector(_) => "vector",
            Value::Map(_) => "hashmap",
            Value::Set(_) => "hashset",
            Value::Function(_) => "function",
            Value::Macro(_) => "macro",
            Value::Undefined(_) => "undefined",
            Value::Exception(_) => "exception",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b))
            | (Value::Keyword(a), Value::Keyword(b))
            | (Value::Undefined(a), Value::Undefined(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            (Value::Function(a), Value::Function(b)) => a.same_as(b),
            (Value::Macro(a), Value::Macro(b)) => a.same_as(b),
            (Value::Exception(a), Value::Exception(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Keyword(k) => write!(f, "Keyword({k})"),
            Value::Vector(items) => f.debug_tuple("Vector").field(&**items).finish(),
            Value::Map(entries) => f.debug_tuple("Map").field(&**entries).finish(),
            Value::Set(items) => f.debug_tuple("Set").field(&**items).finish(),
            Value::Function(func) => write!(f, "{func:?}"),
            Value::Macro(mac) => write!(f, "{mac:?}"),
            Value::Undefined(name) => write!(f, "Undefined({name})"),
            Value::Exception(e) => write!(f, "Exception({e})"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Keyword(k) => write!(f, ":{k}"),
            Value::Vector(items) => write_items(f, "[", items, "]"),
            Value::Set(items) => write_items(f, "#{", items, "}"),
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k} {v}")?;
                }
                write!(f, "}}")
            }
            Value::Function(func) => write!(f, "<function {}>", func.name()),
            Value::Macro(mac) => write!(f, "<macro {}>", mac.name()),
            Value::Undefined(name) => write!(f, "{name}"),
            Value::Exception(e) => write!(f, "{e}"),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}
