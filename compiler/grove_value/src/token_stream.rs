//! Programmatic token construction.
//!
//! Lexing is not part of Grove. Hosts that produce tokens themselves (or
//! tests) can assemble a stream with [`TokenStream`], which tracks
//! positions the way a left-to-right lexer would: each token starts one
//! column after the previous one ends, and `newline` moves to the next line.

use std::sync::Arc;

use grove_ir::Position;

use crate::token::Token;
use crate::value::Value;

/// Builder for a token sequence with advancing positions.
///
/// ```text
/// let tokens = TokenStream::new("repl")
///     .open().ident("+").int(2).int(2).close()
///     .finish();
/// ```
pub struct TokenStream {
    source: Arc<str>,
    line: u32,
    column: u32,
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(source: &str) -> Self {
        TokenStream {
            source: Arc::from(source),
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Position for a token of `width` characters, advancing past it and one separator.
    fn advance(&mut self, width: usize) -> Position {
        let position = Position::new(Arc::clone(&self.source), self.line, self.column);
        let width = u32::try_from(width).unwrap_or(u32::MAX);
        self.column = self.column.saturating_add(width).saturating_add(1);
        position
    }

    fn push(mut self, width: usize, make: impl FnOnce(Position) -> Token) -> Self {
        let position = self.advance(width);
        self.tokens.push(make(position));
        self
    }

    /// Move to column 1 of the next line.
    #[must_use]
    pub fn newline(mut self) -> Self {
        self.line = self.line.saturating_add(1);
        self.column = 1;
        self
    }

    #[must_use]
    pub fn open(self) -> Self {
        self.push(1, Token::list_begin)
    }

    #[must_use]
    pub fn close(self) -> Self {
        self.push(1, Token::list_end)
    }

    /// An unresolved identifier.
    #[must_use]
    pub fn ident(self, name: &str) -> Self {
        self.push(name.chars().count(), |pos| Token::identifier(name, pos))
    }

    /// An identifier the lexer already bound to `value`.
    #[must_use]
    pub fn bound(self, name: &str, value: Value) -> Self {
        self.push(name.chars().count(), |pos| Token::bound_identifier(name, value, pos))
    }

    /// A keyword; `name` is given without the leading `:`.
    #[must_use]
    pub fn keyword(self, name: &str) -> Self {
        let origin = format!(":{name}");
        self.push(origin.chars().count(), |pos| Token::keyword(&origin, pos))
    }

    #[must_use]
    pub fn int(self, n: i64) -> Self {
        let origin = n.to_string();
        self.push(origin.chars().count(), |pos| Token::literal(&origin, Value::Int(n), pos))
    }

    #[must_use]
    pub fn float(self, x: f64) -> Self {
        let origin = format!("{x:?}");
        self.push(origin.chars().count(), |pos| {
            Token::literal(&origin, Value::Float(x), pos)
        })
    }

    #[must_use]
    pub fn string(self, s: &str) -> Self {
        let origin = format!("\"{s}\"");
        self.push(origin.chars().count(), |pos| {
            Token::literal(&origin, Value::string(s), pos)
        })
    }

    #[must_use]
    pub fn boolean(self, b: bool) -> Self {
        let origin = b.to_string();
        self.push(origin.chars().count(), |pos| Token::literal(&origin, Value::Bool(b), pos))
    }

    #[must_use]
    pub fn nil(self) -> Self {
        self.push(3, |pos| Token::literal("nil", Value::Nil, pos))
    }

    /// Input the lexer rejected.
    #[must_use]
    pub fn invalid(self, origin: &str, reason: &str) -> Self {
        self.push(origin.chars().count(), |pos| Token::invalid(origin, reason, pos))
    }

    /// A token carrying an arbitrary precomputed value.
    #[must_use]
    pub fn proxy(self, value: Value) -> Self {
        let width = value.to_string().chars().count();
        self.push(width, |pos| Token::proxy(value, pos))
    }

    /// Append an already built token, advancing by its source width.
    #[must_use]
    pub fn token(self, token: Token) -> Self {
        let width = token.origin().chars().count();
        self.push(width, |_| token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn finish(self) -> Vec<Token> {
        self.tokens
    }
}
