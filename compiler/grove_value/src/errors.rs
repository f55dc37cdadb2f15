//! Error types for tree building and evaluation.
//!
//! Faults travel internally as `Err(EvalError)`. The evaluator's per-call
//! boundary turns them into `Value::Exception`, so hosts only ever see
//! faults as values.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries the typed category. Factory functions (e.g.
//! `not_found_in_context()`) are the public API; they populate both `kind`
//! and `message` and attach a position when the construction site knows it.

use grove_ir::Position;
use std::fmt;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Build
    /// The lexer rejected a token; `reason` is the lexer's explanation.
    InvalidToken {
        reason: String,
    },
    /// The token stream has unbalanced list delimiters.
    InvalidInput,

    // Access
    NotFoundInContext {
        name: String,
    },

    // Call
    NotAFunction {
        name: String,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    RecursionLimitExceeded {
        depth: usize,
    },
    /// A closure outlived the global environment it was created in.
    GlobalsDropped,

    // Type/Arithmetic
    TypeMismatch {
        expected: String,
        got: String,
    },
    DivisionByZero,
    IntegerOverflow {
        operation: String,
    },

    // Macro
    /// A macro received a form it cannot expand.
    MalformedForm {
        form: String,
        message: String,
    },

    /// Catch-all for faults raised by host functions.
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Build
            Self::InvalidToken { reason } => write!(f, "invalid token: {reason}"),
            Self::InvalidInput => write!(f, "unable to build a tree from input"),

            // Access
            Self::NotFoundInContext { name } => {
                write!(f, "\"{name}\" was not found in this context")
            }

            // Call
            Self::NotAFunction { name } => write!(f, "\"{name}\" is not a function"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::RecursionLimitExceeded { depth } => {
                write!(f, "maximum recursion depth exceeded (limit: {depth})")
            }
            Self::GlobalsDropped => write!(f, "global environment no longer exists"),

            // Type/Arithmetic
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),

            // Macro
            Self::MalformedForm { form, message } => write!(f, "{form}: {message}"),

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-made errors.
    pub message: String,
    /// Where the fault happened, when the construction site knew it.
    pub position: Option<Position>,
}

impl EvalError {
    /// Create an unclassified error with just a message.
    ///
    /// Host functions use this for their own faults. Prefer a factory
    /// function when a structured kind fits.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            position: None,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            position: None,
        }
    }

    /// Attach a position, replacing any previous one.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach `position` only if the error has none yet.
    #[must_use]
    pub fn or_position(mut self, position: impl FnOnce() -> Position) -> Self {
        if self.position.is_none() {
            self.position = Some(position());
        }
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Build Errors

/// The lexer produced an `Invalid` token.
#[cold]
pub fn invalid_token(reason: &str, position: Position) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidToken {
        reason: reason.to_string(),
    })
    .with_position(position)
}

/// The token stream could not be shaped into trees.
#[cold]
pub fn invalid_input() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidInput).with_position(Position::unknown())
}

// Access Errors

/// An `Undefined` identifier is bound in neither the local nor the global scope.
#[cold]
pub fn not_found_in_context(name: &str, position: Position) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotFoundInContext {
        name: name.to_string(),
    })
    .with_position(position)
}

// Call Errors

/// The call position resolved to something that is neither a function nor a keyword.
#[cold]
pub fn not_a_function(name: &str, position: Position) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAFunction {
        name: name.to_string(),
    })
    .with_position(position)
}

/// Wrong number of arguments.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// The evaluation depth budget is exhausted.
#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimitExceeded { depth })
}

#[cold]
pub fn globals_dropped() -> EvalError {
    EvalError::from_kind(EvalErrorKind::GlobalsDropped)
}

// Type/Arithmetic Errors

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

// Macro Errors

/// A macro was handed a form it cannot expand.
#[cold]
pub fn malformed_form(form: &str, message: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MalformedForm {
        form: form.to_string(),
        message: message.to_string(),
    })
}
