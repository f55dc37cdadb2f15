use super::*;
use grove_value::{EvalErrorKind, TokenStream};
use pretty_assertions::assert_eq;

fn exception_of(wood: &Wood) -> &grove_value::ExceptionValue {
    let tree = &wood.trees()[0];
    let carrier = tree.nodes()[1].as_token().map(Token::value);
    match carrier {
        Some(Value::Exception(e)) => &**e,
        other => panic!("expected exception carrier, got {other:?}"),
    }
}

#[test]
fn single_call_form() {
    let tokens = TokenStream::new("t")
        .open()
        .ident("+")
        .int(1)
        .int(2)
        .close()
        .finish();
    let wood = build(&tokens);
    assert_eq!(wood.len(), 1);
    assert_eq!(wood.trees()[0].to_string(), "(+ 1 2)");
}

#[test]
fn nested_forms_mirror_brackets() {
    let tokens = TokenStream::new("t")
        .open()
        .ident("+")
        .int(2)
        .int(2)
        .open()
        .ident("*")
        .int(2)
        .int(2)
        .close()
        .close()
        .finish();
    let wood = build(&tokens);
    assert_eq!(wood.len(), 1);
    let tree = &wood.trees()[0];
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.nodes()[3].as_tree().map(Tree::len), Some(3));
    assert_eq!(tree.to_string(), "(+ 2 2 (* 2 2))");
}

#[test]
fn bare_atoms_become_identity_calls() {
    let tokens = TokenStream::new("t")
        .int(5)
        .open()
        .ident("f")
        .close()
        .keyword("k")
        .finish();
    let wood = build(&tokens);
    let rendered: Vec<String> = wood.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["(identity 5)", "(f)", "(identity :k)"]);
}

#[test]
fn empty_list_is_kept() {
    let tokens = TokenStream::new("t").open().close().finish();
    let wood = build(&tokens);
    assert_eq!(wood.len(), 1);
    assert!(wood.trees()[0].is_empty());
}

#[test]
fn invalid_token_collapses_wood() {
    let tokens = TokenStream::new("t")
        .open()
        .ident("f")
        .close()
        .open()
        .invalid("#{", "unsupported reader syntax")
        .close()
        .finish();
    let wood = build(&tokens);
    assert_eq!(wood.len(), 1);

    let exc = exception_of(&wood);
    assert_eq!(
        exc.kind(),
        &EvalErrorKind::InvalidToken {
            reason: "unsupported reader syntax".to_string()
        }
    );
    assert_eq!(exc.position().as_tuple(), ("t", 1, 9));
}

#[test]
fn extra_close_collapses_wood() {
    let tokens = TokenStream::new("t")
        .open()
        .ident("f")
        .close()
        .close()
        .finish();
    let wood = build(&tokens);
    assert_eq!(wood.len(), 1);

    let exc = exception_of(&wood);
    assert_eq!(exc.kind(), &EvalErrorKind::InvalidInput);
    assert!(exc.position().is_unknown());
}

#[test]
fn unclosed_list_collapses_wood() {
    let tokens = TokenStream::new("t").open().ident("f").int(1).finish();
    let wood = build(&tokens);
    assert_eq!(wood.len(), 1);
    assert_eq!(exception_of(&wood).kind(), &EvalErrorKind::InvalidInput);
}

#[test]
fn error_form_head_is_identity() {
    let tokens = TokenStream::new("t").close().finish();
    let wood = build(&tokens);
    let head = wood.trees()[0].head().and_then(Node::as_token);
    assert_eq!(head.map(Token::origin), Some("identity"));
}

#[test]
#[should_panic(expected = "non-empty token stream")]
fn empty_stream_is_a_contract_violation() {
    let _ = build(&[]);
}
