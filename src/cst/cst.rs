use crate::{
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::kinds::{Field, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    /// A leaf. Trivia leaves are stored as tokens of a trivia kind; every
    /// other leaf has an empty `leading` list, its trivia sits right before
    /// it as sibling leaves.
    Token(Token),
}

impl SyntaxElement {
    pub fn span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.span,
            SyntaxElement::Token(token) => token.span,
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            SyntaxElement::Node(_) => None,
            SyntaxElement::Token(token) => Some(token),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    pub field: Option<Field>,
    pub element: SyntaxElement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: NodeKind,
    span: Span,
    children: Vec<Child>,
    /// Only set on `NodeKind::Error` nodes.
    error: Option<Error>,
}

impl SyntaxNode {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn is_error(&self) -> bool {
        self.kind == NodeKind::Error
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn child_by_field(&self, field: Field) -> Option<&SyntaxElement> {
        self.children_by_field(field).next()
    }

    /// First node child carrying `field`.
    pub fn node_by_field(&self, field: Field) -> Option<&SyntaxNode> {
        self.children_by_field(field).find_map(|element| element.as_node())
    }

    pub fn children_by_field(&self, field: Field) -> impl Iterator<Item = &SyntaxElement> {
        self.children
            .iter()
            .filter(move |child| child.field == Some(field))
            .map(|child| &child.element)
    }

    pub fn named_children(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(|child| child.element.as_node())
    }

    /// Pre-order walk over this node and every node below it.
    pub fn descendants(&self) -> Vec<&SyntaxNode> {
        let mut nodes = Vec::new();
        self.collect_descendants(&mut nodes);
        nodes
    }

    fn collect_descendants<'a>(&'a self, nodes: &mut Vec<&'a SyntaxNode>) {
        nodes.push(self);
        for child in self.named_children() {
            child.collect_descendants(nodes);
        }
    }

    /// Every leaf in source order, trivia included.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a Token>) {
        for child in &self.children {
            match &child.element {
                SyntaxElement::Node(node) => node.collect_leaves(leaves),
                SyntaxElement::Token(token) => leaves.push(token),
            }
        }
    }

    pub fn text(&self) -> String {
        self.leaves().iter().map(|token| token.value.as_str()).collect()
    }

    /// First non-trivia leaf.
    pub fn first_token(&self) -> Option<&Token> {
        self.leaves().into_iter().find(|token| !token.is_trivia())
    }
}

/// Collects children bottom-up and computes the node span on `finish`.
pub struct NodeBuilder {
    kind: NodeKind,
    children: Vec<Child>,
    error: Option<Error>,
}

impl NodeBuilder {
    pub fn new(kind: NodeKind) -> Self {
        NodeBuilder {
            kind,
            children: Vec::new(),
            error: None,
        }
    }

    fn push(&mut self, field: Option<Field>, element: SyntaxElement) {
        self.children.push(Child { field, element });
    }

    fn push_token(&mut self, field: Option<Field>, mut token: Token) {
        for trivia in std::mem::take(&mut token.leading) {
            self.push(None, SyntaxElement::Token(trivia));
        }
        self.push(field, SyntaxElement::Token(token));
    }

    pub fn token(&mut self, token: Token) -> &mut Self {
        self.push_token(None, token);
        self
    }

    pub fn field_token(&mut self, field: Field, token: Token) -> &mut Self {
        self.push_token(Some(field), token);
        self
    }

    pub fn node(&mut self, node: SyntaxNode) -> &mut Self {
        self.push(None, SyntaxElement::Node(node));
        self
    }

    pub fn field(&mut self, field: Field, node: SyntaxNode) -> &mut Self {
        self.push(Some(field), SyntaxElement::Node(node));
        self
    }

    pub fn error(&mut self, error: Error) -> &mut Self {
        self.error = Some(error);
        self
    }

    pub fn finish(self) -> SyntaxNode {
        let span = match (self.children.first(), self.children.last()) {
            (Some(first), Some(last)) => Span {
                start: first.element.span().start,
                end: last.element.span().end,
            },
            _ => Span::default(),
        };

        SyntaxNode {
            kind: self.kind,
            span,
            children: self.children,
            error: self.error,
        }
    }
}

/// Wraps a single token in a node of `kind`.
pub fn leaf_node(kind: NodeKind, token: Token) -> SyntaxNode {
    let mut builder = NodeBuilder::new(kind);
    builder.token(token);
    builder.finish()
}

/// Error node for a lexical error token, carrying the lexer's diagnostic.
pub fn lexical_error_node(token: Token) -> SyntaxNode {
    let mut builder = NodeBuilder::new(NodeKind::Error);
    if token.kind == TokenKind::Error {
        if let Some(error) = token.error.clone() {
            builder.error(Error::new(error, token.span.start));
        }
    }
    builder.token(token);
    builder.finish()
}
