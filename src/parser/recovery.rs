//! Statement-level error recovery.
//!
//! When a statement fails to parse, the parser rewinds to where the statement
//! began and wraps a region of tokens in an `ERROR` node. The region ends after
//! a `;` at brace depth zero, after the `}` that closes a brace opened inside
//! the region, or before a `}` that belongs to the enclosing block. Nothing is
//! dropped: every token of the region becomes a leaf of the error node.
//!
//! A region holding a lexical error token reports that token's diagnostic
//! instead of the syntax error it caused, so one mistake yields one error.

use log::debug;

use crate::{
    cst::{
        cst::{NodeBuilder, SyntaxNode},
        kinds::{Field, NodeKind},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

pub type ParseFn = fn(&mut Parser) -> Result<SyntaxNode, Error>;

/// Runs `parse` and pushes its node into `builder`, or an `ERROR` node
/// covering the failed region.
pub fn parse_or_recover(
    parser: &mut Parser,
    builder: &mut NodeBuilder,
    field: Option<Field>,
    parse: ParseFn,
) {
    let start = parser.pos();

    match parse(parser) {
        Ok(node) => match field {
            Some(field) => {
                builder.field(field, node);
            }
            None => {
                builder.node(node);
            }
        },
        Err(error) => {
            parser.rewind(start);
            builder.node(recover(parser, error));
        }
    }
}

pub fn recover(parser: &mut Parser, error: Error) -> SyntaxNode {
    debug!("recovering from {}", error);

    let mut builder = NodeBuilder::new(NodeKind::Error);
    let mut lexical = None;

    let mut depth = 0usize;
    let mut consumed = 0usize;

    loop {
        let kind = parser.current_token_kind();

        if kind == TokenKind::EOF {
            break;
        }
        if kind == TokenKind::CloseCurly && depth == 0 && consumed > 0 {
            break;
        }

        let token = parser.advance();
        consumed += 1;

        if lexical.is_none() {
            if let Some(lexical_error) = &token.error {
                lexical = Some(Error::new(lexical_error.clone(), token.span.start));
            }
        }
        builder.token(token);

        match kind {
            TokenKind::OpenCurly => depth += 1,
            TokenKind::CloseCurly => {
                if depth <= 1 {
                    break;
                }
                depth -= 1;
            }
            TokenKind::Semicolon if depth == 0 => break,
            _ => {}
        }
    }

    debug!("skipped {} tokens", consumed);
    builder.error(lexical.unwrap_or(error));
    builder.finish()
}
