//! Grove Eval - tree-walking evaluator for Grove woods.
//!
//! This crate provides:
//! - `Interpreter` / `InterpreterBuilder`: evaluation of built woods
//! - `EvalMode`: resource policy (recursion-depth budget)
//! - `builtins`: the default prelude and `KeywordRegistry`
//! - `SharedBuiltins`: shared handle to a `BuiltinRegistry`
//!
//! ```text
//! tokens --grove_parse::build--> Wood --Interpreter::evaluate--> [(Value, Tree)]
//! ```

pub mod builtins;
mod eval_mode;
mod interpreter;
mod shared;
mod stack;

use std::sync::Once;

use grove_value::{GlobalEnv, Tree, Value, Wood};

pub use eval_mode::EvalMode;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use shared::SharedBuiltins;
pub use stack::{ensure_sufficient_stack, CallDepth, DepthGuard};

/// Evaluate `wood` against `globals` with the default keyword registry.
///
/// Each tree starts from empty local bindings; `def` writes into `globals`.
pub fn evaluate(wood: &Wood, globals: &GlobalEnv) -> Vec<(Value, Tree)> {
    Interpreter::builder()
        .globals(globals.clone())
        .build()
        .evaluate(wood)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Set `RUST_LOG=grove_eval=debug` to see fault captures, or `=trace` for
/// every call, dispatch and macro expansion.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
