//! Prelude macros.
//!
//! Macros get their argument nodes unevaluated and return a tree for the
//! evaluator to run in the calling environment. Those that must compute a
//! value themselves (`let`, `fn`, `and`, `or`, `map`) return it wrapped as
//! `(identity <value>)`; an exception met while evaluating a sub-form is
//! returned the same way.

use std::cell::OnceCell;
use std::rc::Rc;

use grove_value::errors::{arity_mismatch, malformed_form, type_mismatch};
use grove_value::{
    Bindings, EvalError, FunctionValue, MacroContext, MacroValue, Node, Position, Token,
    TokenKind, Tree, Value, WeakFunctionValue,
};

use super::pattern::{vector_items, Pattern};

type Expansion = Result<Tree, EvalError>;

pub(super) fn install(bindings: &mut Bindings) {
    let table: [(&str, fn(&[Node], &MacroContext<'_>) -> Expansion); 13] = [
        ("if", if_),
        ("def", def),
        ("let", let_),
        ("fn", fn_),
        ("defn", defn),
        ("map", map),
        ("filter", filter),
        ("and", and),
        ("or", or),
        ("cond", cond),
        ("comment", comment),
        ("->", thread_first),
        ("->>", thread_last),
    ];
    for (name, expand) in table {
        bindings.define(name, Value::Macro(MacroValue::new(name, expand)));
    }
}

// Helpers

/// A node as an evaluable form; atoms become `(identity atom)`.
fn form(node: &Node) -> Tree {
    node.clone().into_form()
}

/// `(identity <value>)`: hands an already computed value back to the evaluator.
fn proxy(value: Value, position: Position) -> Tree {
    Tree::identity_of(Token::proxy(value, position))
}

fn anchor(rest: &[Node]) -> Position {
    rest.first()
        .and_then(Node::leading_position)
        .cloned()
        .unwrap_or_else(Position::unknown)
}

fn name_of<'a>(node: &'a Node, form: &str) -> Result<&'a Token, EvalError> {
    match node.as_token() {
        Some(token) if token.kind() == TokenKind::Identifier => Ok(token),
        _ => Err(malformed_form(form, &format!("expected a name, got {node}"))),
    }
}

// Control flow

/// `(if cond then else?)`
fn if_(rest: &[Node], ctx: &MacroContext<'_>) -> Expansion {
    let (test, then, otherwise) = match rest {
        [test, then] => (test, then, None),
        [test, then, otherwise] => (test, then, Some(otherwise)),
        _ => return Err(malformed_form("if", "expects 2 or 3 arguments")),
    };
    let outcome = ctx.evaluate(&form(test));
    if outcome.is_exception() {
        return Ok(proxy(outcome, anchor(rest)));
    }
    match (outcome.is_truthy(), otherwise) {
        (true, _) => Ok(form(then)),
        (false, Some(otherwise)) => Ok(form(otherwise)),
        (false, None) => Ok(Tree::default()),
    }
}

/// `(cond test expr ...)`: the expr of the first truthy test, else nil.
fn cond(rest: &[Node], ctx: &MacroContext<'_>) -> Expansion {
    if rest.len() % 2 != 0 {
        return Err(malformed_form("cond", "expects test/expression pairs"));
    }
    for clause in rest.chunks_exact(2) {
        let outcome = ctx.evaluate(&form(&clause[0]));
        if outcome.is_exception() {
            return Ok(proxy(outcome, anchor(clause)));
        }
        if outcome.is_truthy() {
            return Ok(form(&clause[1]));
        }
    }
    Ok(Tree::default())
}

/// `(and ...)`: first falsy value, else the last one; `true` when empty.
fn and(rest: &[Node], ctx: &MacroContext<'_>) -> Expansion {
    let mut last = Value::Bool(true);
    for node in rest {
        last = ctx.evaluate(&form(node));
        if last.is_exception() || !last.is_truthy() {
            break;
        }
    }
    Ok(proxy(last, anchor(rest)))
}

/// `(or ...)`: first truthy value, else the last one; nil when empty.
fn or(rest: &[Node], ctx: &MacroContext<'_>) -> Expansion {
    let mut last = Value::Nil;
    for node in rest {
        last = ctx.evaluate(&form(node));
        if last.is_exception() || last.is_truthy() {
            break;
        }
    }
    Ok(proxy(last, anchor(rest)))
}

fn comment(_rest: &[Node], _ctx: &MacroContext<'_>) -> Expansion {
    Ok(Tree::default())
}

// Bindings

/// `(def name value)`: bind globally, expand to `(identity name)`.
fn def(rest: &[Node], ctx: &MacroContext<'_>) -> Expansion {
    let [name, value] = rest else {
        return Err(arity_mismatch("def", 2, rest.len()));
    };
    let name = name_of(name, "def")?;
    let value = ctx.evaluate(&form(value));
    if value.is_exception() {
        return Ok(proxy(value, name.position().clone()));
    }
    tracing::trace!(name = name.origin(), "def");
    ctx.globals().define(name.origin(), value);
    Ok(Tree::identity_of(name.clone()))
}

/// `(let [pattern value ...] body...)`
///
/// Each value sees the names bound before it. The body's last value is
/// the result.
fn let_(rest: &[Node], ctx: &MacroContext<'_>) -> Expansion {
    let Some((pairs, body)) = rest.split_first() else {
        return Err(arity_mismatch("let", 2, 0));
    };
    let items = vector_items(pairs, "let")?;
    if items.len() % 2 != 0 {
        return Err(malformed_form("let", "expects name/value pairs"));
    }

    let position = anchor(rest);
    let mut local = ctx.local().clone();
    for pair in items.chunks_exact(2) {
        let pattern = Pattern::parse(&pair[0], "let")?;
        let value = ctx.evaluate_with(&form(&pair[1]), &local);
        if value.is_exception() {
            return Ok(proxy(value, position));
        }
        pattern.bind(value, &mut local, "let")?;
    }

    let result = evaluate_body(ctx, body.iter().map(form), &local);
    Ok(proxy(result, position))
}

fn evaluate_body(
    ctx: &MacroContext<'_>,
    body: impl Iterator<Item = Tree>,
    local: &Bindings,
) -> Value {
    let mut result = Value::Nil;
    for tree in body {
        result = ctx.evaluate_with(&tree, local);
        if result.is_exception() {
            break;
        }
    }
    result
}

/// `(fn [params] body...)` or `(fn name [params] body...)`
///
/// The closure captures the calling local bindings. A named function sees
/// itself under its name.
fn fn_(rest: &[Node], ctx: &MacroContext<'_>) -> Expansion {
    let (name, params, body) = match rest {
        [Node::Token(name), params, body @ ..] if name.kind() == TokenKind::Identifier => {
            (Some(name.origin()), params, body)
        }
        [params, body @ ..] => (None, params, body),
        [] => return Err(malformed_form("fn", "expected a parameter vector")),
    };
    let func = closure("fn", name, params, body, ctx)?;
    Ok(proxy(Value::Function(func), anchor(rest)))
}

/// `(defn name "doc"? [params] body...)`: `(def name (fn name [params] body...))`.
fn defn(rest: &[Node], ctx: &MacroContext<'_>) -> Expansion {
    let (name, params, body) = match rest {
        [name, Node::Token(doc), params, body @ ..]
            if doc.kind() == TokenKind::Literal && doc.value().as_str().is_some() =>
        {
            (name, params, body)
        }
        [name, params, body @ ..] => (name, params, body),
        _ => {
            return Err(malformed_form(
                "defn",
                "expected a name and a parameter vector",
            ))
        }
    };
    let name = name_of(name, "defn")?;
    let func = closure("defn", Some(name.origin()), params, body, ctx)?;
    tracing::trace!(name = name.origin(), "defn");
    ctx.globals().define(name.origin(), Value::Function(func));
    Ok(Tree::identity_of(name.clone()))
}

/// Build the function value behind `fn` and `defn`.
fn closure(
    form_name: &str,
    name: Option<&str>,
    params: &Node,
    body: &[Node],
    ctx: &MacroContext<'_>,
) -> Result<FunctionValue, EvalError> {
    let params = vector_items(params, form_name)?
        .iter()
        .map(|node| Pattern::parse(node, form_name))
        .collect::<Result<Vec<_>, _>>()?;
    let body: Vec<Tree> = body.iter().map(form).collect();

    let label = name.unwrap_or("fn");
    let self_name = name.map(str::to_string);
    let captured = ctx.local().clone();
    let evaluator = ctx.share_evaluator();
    let this: Rc<OnceCell<WeakFunctionValue>> = Rc::default();

    let handle = Rc::clone(&this);
    let call_label = label.to_string();
    let func = FunctionValue::new(label, move |args: &[Value]| {
        if args.len() != params.len() {
            return Err(arity_mismatch(&call_label, params.len(), args.len()));
        }
        let mut local = captured.clone();
        if let Some(name) = &self_name {
            if let Some(me) = handle.get().and_then(WeakFunctionValue::upgrade) {
                local.define(name, Value::Function(me));
            }
        }
        for (pattern, arg) in params.iter().zip(args) {
            pattern.bind(arg.clone(), &mut local, &call_label)?;
        }

        let mut result = Value::Nil;
        for tree in &body {
            result = evaluator.evaluate(tree, &local);
            if result.is_exception() {
                break;
            }
        }
        Ok(result)
    });
    // A fresh cell cannot already be set.
    let _ = this.set(func.downgrade());

    Ok(func)
}

// Collections

/// `(map f coll)`: `[(f x) ...]` over the items of `coll`.
///
/// `f` is called the way a head is, so a keyword looks itself up in each
/// item through the builtin registry.
fn map(rest: &[Node], ctx: &MacroContext<'_>) -> Expansion {
    apply_each("map", rest, ctx, |_item, result, out| out.push(result))
}

/// `(filter pred coll)`: the items of `coll` for which `(pred x)` is truthy.
fn filter(rest: &[Node], ctx: &MacroContext<'_>) -> Expansion {
    apply_each("filter", rest, ctx, |item, result, out| {
        if result.is_truthy() {
            out.push(item);
        }
    })
}

fn apply_each(
    name: &str,
    rest: &[Node],
    ctx: &MacroContext<'_>,
    keep: fn(Value, Value, &mut Vec<Value>),
) -> Expansion {
    let [callee, collection] = rest else {
        return Err(arity_mismatch(name, 2, rest.len()));
    };
    let position = anchor(rest);
    let callee = ctx.evaluate(&form(callee));
    if callee.is_exception() {
        return Ok(proxy(callee, position));
    }
    let collection = ctx.evaluate(&form(collection));
    if collection.is_exception() {
        return Ok(proxy(collection, position));
    }

    let items: Vec<Value> = match &collection {
        Value::Vector(items) | Value::Set(items) => items.to_vec(),
        Value::Map(entries) => entries
            .iter()
            .map(|(k, v)| Value::vector(vec![k.clone(), v.clone()]))
            .collect(),
        Value::Nil => Vec::new(),
        other => return Err(type_mismatch("collection", other.type_name())),
    };

    let head = Node::Token(Token::proxy(callee, position.clone()));
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let call = Tree::new(vec![
            head.clone(),
            Node::Token(Token::proxy(item.clone(), position.clone())),
        ]);
        let result = ctx.evaluate(&call);
        if result.is_exception() {
            return Ok(proxy(result, position));
        }
        keep(item, result, &mut out);
    }
    Ok(proxy(Value::vector(out), position))
}

// Threading

/// `(-> x (f a) g)` expands to `(g (f x a))`.
fn thread_first(rest: &[Node], _ctx: &MacroContext<'_>) -> Expansion {
    thread(rest, "->", |head, threaded, args| {
        let mut nodes = vec![head, threaded];
        nodes.extend_from_slice(args);
        nodes
    })
}

/// `(->> x (f a) g)` expands to `(g (f a x))`.
fn thread_last(rest: &[Node], _ctx: &MacroContext<'_>) -> Expansion {
    thread(rest, "->>", |head, threaded, args| {
        let mut nodes = vec![head];
        nodes.extend_from_slice(args);
        nodes.push(threaded);
        nodes
    })
}

fn thread(
    rest: &[Node],
    name: &str,
    splice: fn(Node, Node, &[Node]) -> Vec<Node>,
) -> Expansion {
    let Some((seed, steps)) = rest.split_first() else {
        return Err(arity_mismatch(name, 1, 0));
    };
    let mut threaded = seed.clone();
    for step in steps {
        let nodes = match step {
            Node::Tree(tree) => match tree.split() {
                Some((head, args)) => splice(head.clone(), threaded, args),
                None => return Err(malformed_form(name, "cannot thread through ()")),
            },
            Node::Token(_) => vec![step.clone(), threaded],
        };
        threaded = Node::Tree(Tree::new(nodes));
    }
    Ok(threaded.into_form())
}
