//! Macro expansion, argument collection and call resolution.

use std::ops::ControlFlow;

use grove_value::errors::{not_a_function, not_found_in_context};
use grove_value::{
    Bindings, Environment, EvalError, EvalResult, MacroContext, MacroValue, Node, Position, Token,
    TokenKind, Tree, Value,
};

use super::Interpreter;

impl Interpreter {
    pub(super) fn eval_tree(&self, local: &Bindings, tree: &Tree) -> EvalResult {
        let Some((head, rest)) = tree.split() else {
            return Ok(Value::Nil);
        };
        let _level = self.depth.enter()?;
        let env = Environment::new(local, &self.globals);

        if let Some(mac) = macro_head(head, &env) {
            tracing::trace!(name = mac.name(), "expanding macro");
            let expansion = mac.expand(rest, &MacroContext::new(self, local))?;
            return Ok(self.recursive(local, &expansion));
        }

        let args = match self.collect_args(local, &env, rest)? {
            ControlFlow::Continue(args) => args,
            ControlFlow::Break(exception) => return Ok(exception),
        };

        match head {
            Node::Tree(inner) => {
                let callee = self.recursive(local, inner);
                if callee.is_exception() {
                    return Ok(callee);
                }
                let position = head.leading_position().cloned();
                self.apply(callee, args, position)
            }
            Node::Token(token) => {
                let callee = match token.kind() {
                    TokenKind::Identifier => resolve(token, &env)?,
                    _ => token.value().clone(),
                };
                self.apply(callee, args, Some(token.position().clone()))
            }
        }
    }

    /// Evaluate arguments left to right.
    ///
    /// Breaks with the first exception a nested tree produces; later
    /// arguments are not evaluated.
    fn collect_args(
        &self,
        local: &Bindings,
        env: &Environment<'_>,
        rest: &[Node],
    ) -> Result<ControlFlow<Value, Vec<Value>>, EvalError> {
        let mut args = Vec::with_capacity(rest.len());
        for node in rest {
            let value = match node {
                Node::Token(token) if token.kind() == TokenKind::Identifier => {
                    resolve(token, env)?
                }
                Node::Token(token) => token.value().clone(),
                Node::Tree(inner) => {
                    let value = self.recursive(local, inner);
                    if value.is_exception() {
                        return Ok(ControlFlow::Break(value));
                    }
                    value
                }
            };
            args.push(value);
        }
        Ok(ControlFlow::Continue(args))
    }

    fn apply(&self, callee: Value, mut args: Vec<Value>, position: Option<Position>) -> EvalResult {
        match callee {
            Value::Function(func) => {
                tracing::trace!(name = func.name(), args = args.len(), "call");
                func.call(&args)
            }
            Value::Keyword(_) => {
                tracing::trace!(keyword = %callee, args = args.len(), "keyword dispatch");
                args.push(callee);
                self.builtins.dispatch(&args)
            }
            Value::Nil
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Str(_)
            | Value::Vector(_)
            | Value::Map(_)
            | Value::Set(_)
            | Value::Macro(_)
            | Value::Undefined(_)
            | Value::Exception(_) => Err(not_a_function(
                &callee.to_string(),
                position.unwrap_or_else(Position::unknown),
            )),
        }
    }
}

/// The macro a head names, if any.
///
/// A macro the lexer bound to the token wins. Otherwise an identifier head
/// names a macro when its environment binding is one. Identifier heads that
/// fail to resolve are not faults here; resolution is retried (and
/// reported) after the arguments are collected.
fn macro_head(head: &Node, env: &Environment<'_>) -> Option<MacroValue> {
    let token = head.as_token()?;
    if let Value::Macro(mac) = token.value() {
        return Some(mac.clone());
    }
    if token.kind() != TokenKind::Identifier {
        return None;
    }
    match env.lookup(token.origin()) {
        Some(Value::Macro(mac)) => Some(mac),
        _ => None,
    }
}

/// Resolve an identifier: local bindings, then globals, then the token's
/// own value. An unresolved `Undefined` token is a fault.
fn resolve(token: &Token, env: &Environment<'_>) -> EvalResult {
    match env.lookup(token.origin()) {
        Some(value) => Ok(value),
        None if token.is_undefined() => Err(not_found_in_context(
            token.origin(),
            token.position().clone(),
        )),
        None => Ok(token.value().clone()),
    }
}
