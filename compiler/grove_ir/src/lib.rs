//! Grove IR - shared vocabulary for the Grove s-expression evaluator.
//!
//! This crate contains the pieces every other Grove crate agrees on:
//! - `Position` for diagnostics (source name, line, column)
//! - `TokenKind` for the classification the lexer attaches to each token
//!
//! Runtime values (and therefore full tokens, which carry a bound value)
//! live in `grove_value`.

mod position;
mod token_kind;

pub use position::{Position, UNKNOWN_SOURCE};
pub use token_kind::TokenKind;
