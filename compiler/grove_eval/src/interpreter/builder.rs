//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use grove_value::{BuiltinRegistry, GlobalEnv};

use super::Interpreter;
use crate::builtins::{prelude, KeywordRegistry};
use crate::eval_mode::EvalMode;
use crate::shared::SharedBuiltins;
use crate::stack::CallDepth;

/// Builder for creating Interpreter instances.
///
/// Every piece has a default:
/// - globals: a fresh [`prelude`]
/// - builtins: [`KeywordRegistry`]
/// - mode: [`EvalMode::Interpret`]
#[derive(Debug, Default)]
pub struct InterpreterBuilder {
    globals: Option<GlobalEnv>,
    builtins: Option<SharedBuiltins>,
    mode: EvalMode,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate against these globals. The handle is shared, so `def` in
    /// the interpreter is visible to the caller.
    #[must_use]
    pub fn globals(mut self, globals: GlobalEnv) -> Self {
        self.globals = Some(globals);
        self
    }

    /// Dispatch keywords in call position through `registry`.
    #[must_use]
    pub fn builtins(mut self, registry: impl BuiltinRegistry + 'static) -> Self {
        self.builtins = Some(SharedBuiltins::new(registry));
        self
    }

    #[must_use]
    pub fn shared_builtins(mut self, builtins: SharedBuiltins) -> Self {
        self.builtins = Some(builtins);
        self
    }

    /// Set the evaluation mode.
    ///
    /// Controls the recursion-depth budget.
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn build(self) -> Interpreter {
        let depth = CallDepth::new(self.mode.max_recursion_depth());
        Interpreter {
            globals: self.globals.unwrap_or_else(prelude),
            builtins: self
                .builtins
                .unwrap_or_else(|| SharedBuiltins::new(KeywordRegistry)),
            mode: self.mode,
            depth,
        }
    }
}
