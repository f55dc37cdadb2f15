//! Grove Value - the data the Grove evaluator works on.
//!
//! This crate provides:
//! - `Value`: the closed set of runtime values, including exceptions as values
//! - `Token`, `Node`, `Tree`, `Wood`: the tree builder's input and output
//! - `Bindings`, `GlobalEnv`, `Environment`: the two-level environment
//! - `MacroContext` / `TreeEvaluator`: the capability macros receive
//! - `BuiltinRegistry`: the keyword dispatch boundary
//! - `EvalError`, `EvalErrorKind`, `EvalResult` and their factory functions
//! - `TokenStream`: programmatic token construction for hosts and tests

mod context;
mod environment;
pub mod errors;
mod registry;
mod token;
mod token_stream;
mod tree;
mod value;

pub use context::{ClosureEvaluator, MacroContext, TreeEvaluator};
pub use environment::{Bindings, Environment, GlobalEnv, WeakGlobalEnv};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use registry::BuiltinRegistry;
pub use token::Token;
pub use token_stream::TokenStream;
pub use tree::{Node, Tree, Wood};
pub use value::{
    ExceptionValue, FunctionValue, Heap, MacroFn, MacroValue, NativeFn, Value, WeakFunctionValue,
};

// Re-export the shared vocabulary so downstream crates need one import path.
pub use grove_ir::{Position, TokenKind};
