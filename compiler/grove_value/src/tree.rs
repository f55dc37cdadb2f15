//! Trees and woods.
//!
//! A tree is one call form: its head names the thing to call and the
//! remaining nodes are the arguments. A wood is the ordered list of
//! top-level trees built from one token stream.

use std::fmt;

use grove_ir::Position;

use crate::token::Token;

/// One element of a tree: an atom or a nested form.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Token(Token),
    Tree(Tree),
}

impl Node {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Node::Token(token) => Some(token),
            Node::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Node::Tree(tree) => Some(tree),
            Node::Token(_) => None,
        }
    }

    /// Position of the first token reachable through leading heads.
    ///
    /// `((f x) y)` reports the position of `f`.
    pub fn leading_position(&self) -> Option<&Position> {
        match self {
            Node::Token(token) => Some(token.position()),
            Node::Tree(tree) => tree.head().and_then(Node::leading_position),
        }
    }

    /// Turn this node into a form: trees stay as they are, atoms become
    /// `(identity atom)`.
    pub fn into_form(self) -> Tree {
        match self {
            Node::Tree(tree) => tree,
            Node::Token(token) => Tree::identity_of(token),
        }
    }
}

impl From<Token> for Node {
    fn from(token: Token) -> Self {
        Node::Token(token)
    }
}

impl From<Tree> for Node {
    fn from(tree: Tree) -> Self {
        Node::Tree(tree)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Token(token) => write!(f, "{token}"),
            Node::Tree(tree) => write!(f, "{tree}"),
        }
    }
}

/// An ordered sequence of nodes forming one call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Tree { nodes }
    }

    /// `(identity atom)`, positioned at the atom.
    pub fn identity_of(atom: Token) -> Self {
        let head = Token::identity(atom.position().clone());
        Tree::new(vec![Node::Token(head), Node::Token(atom)])
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn head(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// `(head, rest)`, or `None` for the empty tree.
    #[inline]
    pub fn split(&self) -> Option<(&Node, &[Node])> {
        self.nodes.split_first()
    }

    /// Position of the head when the head is a token.
    pub fn head_token_position(&self) -> Option<&Position> {
        self.head().and_then(Node::as_token).map(Token::position)
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{node}")?;
        }
        write!(f, ")")
    }
}

/// The top-level trees built from one token stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Wood {
    trees: Vec<Tree>,
}

impl Wood {
    pub fn new(trees: Vec<Tree>) -> Self {
        Wood { trees }
    }

    #[inline]
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tree> {
        self.trees.iter()
    }
}

impl<'a> IntoIterator for &'a Wood {
    type Item = &'a Tree;
    type IntoIter = std::slice::Iter<'a, Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.iter()
    }
}

impl IntoIterator for Wood {
    type Item = Tree;
    type IntoIter = std::vec::IntoIter<Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.into_iter()
    }
}

#[cfg(test)]
mod tests;
