//! Binding patterns for `let` and `fn`.
//!
//! A pattern is a name, or a `[...]` vector of patterns that destructures a
//! vector value of the same length: `(let [[a [b c]] v] ...)`.

use grove_value::errors::{malformed_form, type_mismatch};
use grove_value::{Bindings, EvalError, Node, TokenKind, Tree, Value};

#[derive(Clone, Debug, PartialEq)]
pub(super) enum Pattern {
    Name(String),
    Vector(Vec<Pattern>),
}

impl Pattern {
    /// Read a pattern from its unevaluated form. `form` names the macro
    /// for error messages.
    pub(super) fn parse(node: &Node, form: &str) -> Result<Self, EvalError> {
        if let Some(token) = node.as_token() {
            if token.kind() == TokenKind::Identifier {
                return Ok(Pattern::Name(token.origin().to_string()));
            }
        } else if let Ok(items) = vector_items(node, form) {
            return items
                .iter()
                .map(|item| Pattern::parse(item, form))
                .collect::<Result<Vec<_>, _>>()
                .map(Pattern::Vector);
        }
        Err(malformed_form(
            form,
            &format!("expected a name or a vector of names, got {node}"),
        ))
    }

    /// Bind `value` into `local` according to this pattern.
    pub(super) fn bind(&self, value: Value, local: &mut Bindings, form: &str) -> Result<(), EvalError> {
        match self {
            Pattern::Name(name) => {
                local.define(name, value);
                Ok(())
            }
            Pattern::Vector(patterns) => {
                let Value::Vector(items) = &value else {
                    return Err(type_mismatch("vector", value.type_name()));
                };
                if items.len() != patterns.len() {
                    return Err(malformed_form(
                        form,
                        &format!(
                            "cannot destructure {} items into {} names",
                            items.len(),
                            patterns.len()
                        ),
                    ));
                }
                for (pattern, item) in patterns.iter().zip(items.iter()) {
                    pattern.bind(item.clone(), local, form)?;
                }
                Ok(())
            }
        }
    }
}

/// Items of a `[...]` vector literal, which the lexer delivers as a
/// `(make-vector ...)` form.
pub(super) fn vector_items<'a>(node: &'a Node, form: &str) -> Result<&'a [Node], EvalError> {
    match node.as_tree().and_then(Tree::split) {
        Some((head, items)) if head.as_token().is_some_and(|t| t.origin() == "make-vector") => {
            Ok(items)
        }
        _ => Err(malformed_form(form, &format!("expected a vector, got {node}"))),
    }
}
