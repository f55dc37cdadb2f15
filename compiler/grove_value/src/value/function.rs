//! Callable values: functions and macros.

use std::fmt;
use std::rc::{Rc, Weak};

use crate::context::MacroContext;
use crate::errors::{arity_mismatch, EvalError, EvalResult};
use crate::tree::{Node, Tree};
use crate::value::{Heap, Value};

/// Signature of a function body: evaluated arguments in, value or fault out.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult;

/// Signature of a macro body: raw argument nodes in, expansion out.
pub type MacroFn = dyn Fn(&[Node], &MacroContext<'_>) -> Result<Tree, EvalError>;

/// A function value. Invoked with the evaluated argument list.
#[derive(Clone)]
pub struct FunctionValue {
    name: Heap<str>,
    func: Rc<NativeFn>,
}

impl FunctionValue {
    pub fn new(name: &str, func: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        FunctionValue {
            name: Heap::of_str(name),
            func: Rc::new(func),
        }
    }

    /// `(identity x)` returns `x`. The tree builder wraps bare atoms with it.
    pub fn identity() -> Self {
        FunctionValue::new("identity", |args| match args {
            [value] => Ok(value.clone()),
            _ => Err(arity_mismatch("identity", 1, args.len())),
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.func)(args)
    }

    /// Identity comparison: two function values are equal only if they share a body.
    pub fn same_as(&self, other: &FunctionValue) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }

    /// A non-owning handle. Closures that refer to themselves hold this one.
    pub fn downgrade(&self) -> WeakFunctionValue {
        WeakFunctionValue {
            name: self.name.clone(),
            func: Rc::downgrade(&self.func),
        }
    }
}

/// Non-owning counterpart of [`FunctionValue`].
#[derive(Clone)]
pub struct WeakFunctionValue {
    name: Heap<str>,
    func: Weak<NativeFn>,
}

impl WeakFunctionValue {
    /// `None` once every owning handle is gone.
    pub fn upgrade(&self) -> Option<FunctionValue> {
        self.func.upgrade().map(|func| FunctionValue {
            name: self.name.clone(),
            func,
        })
    }
}

impl fmt::Debug for WeakFunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeakFunctionValue({})", self.name)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionValue({})", self.name)
    }
}

/// A macro value.
///
/// Receives the unevaluated argument nodes and a [`MacroContext`]; returns
/// a tree that the evaluator then evaluates in the calling environment.
#[derive(Clone)]
pub struct MacroValue {
    name: Heap<str>,
    func: Rc<MacroFn>,
}

impl MacroValue {
    pub fn new(
        name: &str,
        func: impl Fn(&[Node], &MacroContext<'_>) -> Result<Tree, EvalError> + 'static,
    ) -> Self {
        MacroValue {
            name: Heap::of_str(name),
            func: Rc::new(func),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn expand(&self, rest: &[Node], ctx: &MacroContext<'_>) -> Result<Tree, EvalError> {
        (self.func)(rest, ctx)
    }

    pub fn same_as(&self, other: &MacroValue) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for MacroValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacroValue({})", self.name)
    }
}
