//! Tree-walking interpreter.
//!
//! [`Interpreter::evaluate`] walks each top-level tree of a wood with empty
//! local bindings. Every recursive step goes through [`Interpreter::recursive`],
//! the fault boundary: internally faults travel as `Err(EvalError)`, and the
//! boundary turns them into `Value::Exception` tagged with the best position
//! it knows. Nothing escapes `evaluate` as an error.

mod builder;
mod call;

use std::rc::Rc;

use grove_value::errors::globals_dropped;
use grove_value::{
    Bindings, ClosureEvaluator, EvalError, GlobalEnv, Position, Tree, TreeEvaluator, Value,
    WeakGlobalEnv, Wood,
};

use crate::eval_mode::EvalMode;
use crate::shared::SharedBuiltins;
use crate::stack::{ensure_sufficient_stack, CallDepth};

pub use builder::InterpreterBuilder;

/// Evaluates woods against a two-level environment.
///
/// Cloning is cheap and yields a handle onto the same globals, registry and
/// depth counter. Closures created by `fn` hold the globals weakly, so
/// dropping every interpreter and `GlobalEnv` handle frees the globals.
#[derive(Clone, Debug)]
pub struct Interpreter {
    globals: GlobalEnv,
    builtins: SharedBuiltins,
    mode: EvalMode,
    depth: CallDepth,
}

impl Interpreter {
    /// An interpreter over the default prelude and keyword registry.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Evaluate every tree of `wood`, pairing each result with its tree.
    ///
    /// Trees are independent: a fault in one yields an exception value for
    /// that tree only.
    #[tracing::instrument(level = "debug", skip_all, fields(forms = wood.len()))]
    pub fn evaluate(&self, wood: &Wood) -> Vec<(Value, Tree)> {
        let local = Bindings::new();
        wood.iter()
            .map(|tree| (self.recursive(&local, tree), tree.clone()))
            .collect()
    }

    /// Evaluate one tree behind the fault boundary.
    pub fn recursive(&self, local: &Bindings, tree: &Tree) -> Value {
        ensure_sufficient_stack(|| match self.eval_tree(local, tree) {
            Ok(value) => value,
            Err(error) => capture(error, tree),
        })
    }

    #[inline]
    pub fn globals(&self) -> &GlobalEnv {
        &self.globals
    }

    #[inline]
    pub fn mode(&self) -> &EvalMode {
        &self.mode
    }

    /// Current nesting of evaluations in progress.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth.current()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeEvaluator for Interpreter {
    fn evaluate(&self, tree: &Tree, local: &Bindings) -> Value {
        self.recursive(local, tree)
    }

    fn globals(&self) -> &GlobalEnv {
        &self.globals
    }

    fn share(&self) -> Rc<dyn ClosureEvaluator> {
        Rc::new(DetachedInterpreter {
            globals: self.globals.downgrade(),
            builtins: self.builtins.clone(),
            mode: self.mode.clone(),
            depth: self.depth.clone(),
        })
    }
}

/// The interpreter a closure keeps: the globals are held weakly.
struct DetachedInterpreter {
    globals: WeakGlobalEnv,
    builtins: SharedBuiltins,
    mode: EvalMode,
    depth: CallDepth,
}

impl ClosureEvaluator for DetachedInterpreter {
    fn evaluate(&self, tree: &Tree, local: &Bindings) -> Value {
        let Some(globals) = self.globals.upgrade() else {
            return capture(globals_dropped(), tree);
        };
        let interpreter = Interpreter {
            globals,
            builtins: self.builtins.clone(),
            mode: self.mode.clone(),
            depth: self.depth.clone(),
        };
        interpreter.recursive(local, tree)
    }
}

/// Turn a fault into an exception value.
///
/// Position: the fault's own, else the tree's leading token, else unknown.
#[cold]
fn capture(error: EvalError, tree: &Tree) -> Value {
    let error = error.or_position(|| {
        tree.head_token_position()
            .cloned()
            .unwrap_or_else(Position::unknown)
    });
    tracing::debug!(error = %error, tree = %tree, "fault captured");
    Value::captured(error)
}
