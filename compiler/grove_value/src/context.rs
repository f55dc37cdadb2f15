//! The evaluator capability handed to macros.
//!
//! Macros never see the evaluator's internals. They get a [`MacroContext`]
//! that can evaluate a tree with some local bindings, read the calling
//! bindings and globals, and hand out an owned evaluator for closures that
//! outlive the expansion.

use std::rc::Rc;

use crate::environment::{Bindings, GlobalEnv};
use crate::tree::Tree;
use crate::value::Value;

/// Something that can evaluate trees.
///
/// `evaluate` follows the same contract as the evaluator's own recursion:
/// faults come back as `Value::Exception`, never as `Err`.
pub trait TreeEvaluator {
    fn evaluate(&self, tree: &Tree, local: &Bindings) -> Value;

    fn globals(&self) -> &GlobalEnv;

    /// An owned handle for closures created during expansion.
    fn share(&self) -> Rc<dyn ClosureEvaluator>;
}

/// The evaluator a closure keeps after its expansion is over.
///
/// It must not own the globals: closures are routinely stored in them.
/// Once the globals are gone, `evaluate` returns a `GlobalsDropped`
/// exception value.
pub trait ClosureEvaluator {
    fn evaluate(&self, tree: &Tree, local: &Bindings) -> Value;
}

/// What a macro sees while expanding.
pub struct MacroContext<'a> {
    evaluator: &'a dyn TreeEvaluator,
    local: &'a Bindings,
}

impl<'a> MacroContext<'a> {
    pub fn new(evaluator: &'a dyn TreeEvaluator, local: &'a Bindings) -> Self {
        MacroContext { evaluator, local }
    }

    /// Evaluate `tree` in the calling environment.
    pub fn evaluate(&self, tree: &Tree) -> Value {
        self.evaluator.evaluate(tree, self.local)
    }

    /// Evaluate `tree` with other local bindings.
    pub fn evaluate_with(&self, tree: &Tree, local: &Bindings) -> Value {
        self.evaluator.evaluate(tree, local)
    }

    /// The caller's local bindings.
    #[inline]
    pub fn local(&self) -> &'a Bindings {
        self.local
    }

    #[inline]
    pub fn globals(&self) -> &GlobalEnv {
        self.evaluator.globals()
    }

    pub fn share_evaluator(&self) -> Rc<dyn ClosureEvaluator> {
        self.evaluator.share()
    }
}
