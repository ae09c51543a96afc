use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::cst::{SyntaxElement, SyntaxNode};

/// Result of one parse: the source text and the `source_file` node built
/// from it. Immutable, every leaf of `root` is a slice of `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    source: String,
    root: SyntaxNode,
}

impl Tree {
    pub fn new(source: String, root: SyntaxNode) -> Self {
        Tree { source, root }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn text(&self) -> &str {
        &self.source
    }

    pub fn error_nodes(&self) -> Vec<&SyntaxNode> {
        self.root
            .descendants()
            .into_iter()
            .filter(|node| node.is_error())
            .collect()
    }

    pub fn errors(&self) -> Vec<&Error> {
        self.error_nodes()
            .into_iter()
            .filter_map(|node| node.error())
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.error_nodes().is_empty()
    }

    pub fn to_sexp(&self) -> String {
        to_sexp(&self.root)
    }
}

/// Renders `node` the way tree-sitter prints trees: named nodes only,
/// `field: ` prefixes, comments as `(comment_*)` leaves.
pub fn to_sexp(node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_sexp(node, &mut out);
    out
}

fn write_sexp(node: &SyntaxNode, out: &mut String) {
    out.push('(');
    out.push_str(node.kind().as_str());

    for child in node.children() {
        match &child.element {
            SyntaxElement::Node(inner) => {
                out.push(' ');
                if let Some(field) = child.field {
                    out.push_str(field.as_str());
                    out.push_str(": ");
                }
                write_sexp(inner, out);
            }
            SyntaxElement::Token(token) => {
                if let Some(name) = comment_name(token.kind) {
                    out.push_str(" (");
                    out.push_str(name);
                    out.push(')');
                }
            }
        }
    }

    out.push(')');
}

fn comment_name(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::CommentLine => Some("comment_line"),
        TokenKind::CommentBlock => Some("comment_block"),
        TokenKind::CommentMarkdownBlock => Some("comment_markdown_block"),
        _ => None,
    }
}
