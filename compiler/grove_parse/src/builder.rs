//! Stack-based construction of trees from tokens.

use grove_value::errors::{invalid_input, invalid_token};
use grove_value::{EvalError, Node, Position, Token, TokenKind, Tree, Value, Wood};

/// Build the wood for `tokens`.
///
/// # Panics
///
/// Panics if `tokens` is empty. An empty stream is a caller error, not
/// malformed source.
pub fn build(tokens: &[Token]) -> Wood {
    TreeBuilder::new(tokens).build()
}

/// Builds a [`Wood`] from a borrowed token stream.
pub struct TreeBuilder<'a> {
    tokens: &'a [Token],
}

impl<'a> TreeBuilder<'a> {
    /// # Panics
    ///
    /// Panics if `tokens` is empty.
    pub fn new(tokens: &'a [Token]) -> Self {
        assert!(
            !tokens.is_empty(),
            "TreeBuilder requires a non-empty token stream"
        );
        TreeBuilder { tokens }
    }

    /// Build the wood. All or nothing: any structural fault yields the
    /// single-form error wood instead of a partial result.
    #[tracing::instrument(level = "trace", skip_all, fields(tokens = self.tokens.len()))]
    pub fn build(&self) -> Wood {
        match self.shape() {
            Ok(items) => Wood::new(items.into_iter().map(Node::into_form).collect()),
            Err(error) => {
                tracing::debug!(%error, "token stream collapsed to an error form");
                error_wood(error)
            }
        }
    }

    /// Nest tokens by their list delimiters.
    fn shape(&self) -> Result<Vec<Node>, EvalError> {
        let mut stack: Vec<Vec<Node>> = vec![Vec::new()];

        for token in self.tokens {
            match token.kind() {
                TokenKind::ListBegin => stack.push(Vec::new()),
                TokenKind::ListEnd => {
                    // The top-level list is never closed by a token.
                    if stack.len() < 2 {
                        return Err(invalid_input());
                    }
                    let finished = stack.pop().unwrap_or_default();
                    if let Some(parent) = stack.last_mut() {
                        parent.push(Node::Tree(Tree::new(finished)));
                    }
                }
                TokenKind::Invalid => {
                    let reason = token.reason().unwrap_or_else(|| token.origin());
                    return Err(invalid_token(reason, token.position().clone()));
                }
                TokenKind::Identifier
                | TokenKind::Keyword
                | TokenKind::Literal
                | TokenKind::Proxy => {
                    if let Some(current) = stack.last_mut() {
                        current.push(Node::Token(token.clone()));
                    }
                }
            }
        }

        if stack.len() != 1 {
            return Err(invalid_input());
        }
        Ok(stack.pop().unwrap_or_default())
    }
}

/// `(identity <exception>)`: the one form a malformed stream becomes.
fn error_wood(error: EvalError) -> Wood {
    let position = error.position.clone().unwrap_or_else(Position::unknown);
    let carrier = Token::proxy(Value::exception(error, position.clone()), position);
    Wood::new(vec![Tree::identity_of(carrier)])
}

#[cfg(test)]
mod tests;
