use super::*;
use crate::value::Value;
use pretty_assertions::assert_eq;

fn at(column: u32) -> Position {
    Position::new("test", 1, column)
}

#[test]
fn identity_of_wraps_atom() {
    let tree = Tree::identity_of(Token::literal("5", Value::Int(5), at(3)));
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.to_string(), "(identity 5)");
    assert_eq!(tree.head_token_position(), Some(&at(3)));
}

#[test]
fn split_and_head() {
    let tree = Tree::new(vec![
        Token::identifier("+", at(2)).into(),
        Token::literal("1", Value::Int(1), at(4)).into(),
    ]);
    let Some((head, rest)) = tree.split() else {
        panic!("non-empty tree must split");
    };
    assert_eq!(head.as_token().map(Token::origin), Some("+"));
    assert_eq!(rest.len(), 1);
    assert!(Tree::default().split().is_none());
}

#[test]
fn leading_position_walks_computed_heads() {
    let inner = Tree::new(vec![Token::identifier("f", at(3)).into()]);
    let outer = Node::Tree(Tree::new(vec![inner.into()]));
    assert_eq!(outer.leading_position(), Some(&at(3)));
}

#[test]
fn into_form_leaves_trees_alone() {
    let tree = Tree::new(vec![Token::identifier("f", at(2)).into()]);
    assert_eq!(Node::Tree(tree.clone()).into_form(), tree);
}

#[test]
fn nested_display() {
    let inner = Tree::new(vec![
        Token::identifier("*", at(9)).into(),
        Token::literal("2", Value::Int(2), at(11)).into(),
    ]);
    let outer = Tree::new(vec![
        Token::identifier("+", at(2)).into(),
        Token::literal("1", Value::Int(1), at(4)).into(),
        inner.into(),
    ]);
    assert_eq!(outer.to_string(), "(+ 1 (* 2))");
}

#[test]
fn wood_iterates_in_order() {
    let a = Tree::identity_of(Token::literal("1", Value::Int(1), at(1)));
    let b = Tree::identity_of(Token::literal("2", Value::Int(2), at(3)));
    let wood = Wood::new(vec![a.clone(), b.clone()]);
    let collected: Vec<&Tree> = wood.iter().collect();
    assert_eq!(collected, vec![&a, &b]);
    assert_eq!(wood.len(), 2);
}
