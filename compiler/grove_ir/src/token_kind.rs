//! Token classification.

use std::fmt;

/// Kind of a lexed token.
///
/// The tree builder only distinguishes list delimiters and `Invalid`; the
/// evaluator additionally distinguishes `Identifier` (resolved through the
/// environment) and `Keyword` (dispatched through the builtin registry).
/// `Literal` and `Proxy` tokens contribute their bound value as-is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `(`
    ListBegin,
    /// `)`
    ListEnd,
    /// A name to resolve against the environment.
    Identifier,
    /// A keyword tag such as `:name`.
    Keyword,
    /// Input the lexer could not classify.
    Invalid,
    /// A literal carrying its value (numbers, strings, booleans, nil).
    Literal,
    /// A token synthesized to carry an already computed value.
    Proxy,
}

impl TokenKind {
    /// Whether this kind opens or closes a list.
    #[inline]
    pub fn is_delimiter(self) -> bool {
        matches!(self, TokenKind::ListBegin | TokenKind::ListEnd)
    }

    /// Human-readable name for diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::ListBegin => "list begin",
            TokenKind::ListEnd => "list end",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Invalid => "invalid token",
            TokenKind::Literal => "literal",
            TokenKind::Proxy => "proxy",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
