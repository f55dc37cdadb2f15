//! Builtin dispatch boundary.

use crate::errors::EvalResult;
use crate::value::Value;

/// Resolves a keyword in call position to behavior.
///
/// The evaluator calls `dispatch` with the evaluated arguments followed by
/// the keyword itself as the last element. How the keyword maps to behavior
/// is entirely up to the implementation.
pub trait BuiltinRegistry {
    fn dispatch(&self, args_and_keyword: &[Value]) -> EvalResult;
}
