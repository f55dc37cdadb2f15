//! Exceptions as values.

use grove_ir::Position;
use std::fmt;

use crate::errors::{EvalError, EvalErrorKind};

/// A fault captured as a first-class value, with its best-known position.
///
/// Produced by the evaluator's per-call boundary and returned in the normal
/// result position. Nothing unwinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExceptionValue {
    error: EvalError,
    position: Position,
}

impl ExceptionValue {
    pub fn new(error: EvalError, position: Position) -> Self {
        ExceptionValue { error, position }
    }

    /// Capture `error` at its own position, falling back to `(UNK, 1, 1)`.
    pub fn capture(error: EvalError) -> Self {
        let position = error.position.clone().unwrap_or_else(Position::unknown);
        ExceptionValue { error, position }
    }

    #[inline]
    pub fn error(&self) -> &EvalError {
        &self.error
    }

    #[inline]
    pub fn kind(&self) -> &EvalErrorKind {
        &self.error.kind
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.error.message
    }
}

impl fmt::Display for ExceptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.error.message, self.position)
    }
}
