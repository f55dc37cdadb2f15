//! Tokens as consumed by the tree builder and the evaluator.
//!
//! Tokens come from an external lexer and are read-only here. Each one
//! carries its kind, the runtime value the lexer bound to it, its source
//! text and its position.

use std::fmt;

use grove_ir::{Position, TokenKind};

use crate::value::{FunctionValue, Heap, Value};

/// A lexed token with its bound value.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    kind: TokenKind,
    value: Value,
    origin: Heap<str>,
    position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: Value, origin: &str, position: Position) -> Self {
        Token {
            kind,
            value,
            origin: Heap::of_str(origin),
            position,
        }
    }

    /// An identifier the lexer could not resolve; bound to `Undefined(name)`.
    pub fn identifier(name: &str, position: Position) -> Self {
        Token::new(TokenKind::Identifier, Value::undefined(name), name, position)
    }

    /// An identifier the lexer already bound to `value`.
    ///
    /// Environment bindings still take precedence; `value` is the fallback.
    pub fn bound_identifier(name: &str, value: Value, position: Position) -> Self {
        Token::new(TokenKind::Identifier, value, name, position)
    }

    /// The synthetic `identity` head used to turn an atom into a call.
    ///
    /// A proxy, not an identifier: it always calls the builtin identity,
    /// whatever `identity` is bound to in the environment.
    pub fn identity(position: Position) -> Self {
        Token::new(
            TokenKind::Proxy,
            Value::Function(FunctionValue::identity()),
            "identity",
            position,
        )
    }

    /// A keyword token; `name` may include the leading `:`.
    pub fn keyword(name: &str, position: Position) -> Self {
        Token::new(TokenKind::Keyword, Value::keyword(name), name, position)
    }

    pub fn literal(origin: &str, value: Value, position: Position) -> Self {
        Token::new(TokenKind::Literal, value, origin, position)
    }

    /// A token carrying an already computed value, e.g. a macro result.
    pub fn proxy(value: Value, position: Position) -> Self {
        let origin = value.to_string();
        Token::new(TokenKind::Proxy, value, &origin, position)
    }

    pub fn list_begin(position: Position) -> Self {
        Token::new(TokenKind::ListBegin, Value::Nil, "(", position)
    }

    pub fn list_end(position: Position) -> Self {
        Token::new(TokenKind::ListEnd, Value::Nil, ")", position)
    }

    /// Input the lexer rejected. `reason` explains why.
    pub fn invalid(origin: &str, reason: &str, position: Position) -> Self {
        Token::new(TokenKind::Invalid, Value::string(reason), origin, position)
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The value the lexer bound to this token.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Source text of the token; for identifiers, the name to look up.
    #[inline]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Why the lexer rejected this token, for `Invalid` tokens.
    pub fn reason(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Invalid => Some(self.value.as_str().unwrap_or(&self.origin)),
            _ => None,
        }
    }

    /// Whether the lexer left this token for runtime resolution.
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self.value, Value::Undefined(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.origin)
    }
}
