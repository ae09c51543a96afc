//! Parser state and the top-level statement loop.
//!
//! The parser walks significant tokens (trivia is already folded into
//! `Token::leading`) and builds the concrete syntax tree bottom-up. Every
//! parse function returns `Result<SyntaxNode, Error>`, a failed statement is
//! turned into an `ERROR` node by [`super::recovery`] so the loop never stops
//! before end-of-input.

use log::debug;

use crate::{
    cst::{
        cst::{NodeBuilder, SyntaxNode},
        kinds::NodeKind,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Keyword, Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::stmt::{parse_statement_list, ListEnd};

/// Deepest nesting of expressions, statements and types the parser follows.
/// Anything deeper becomes an error node instead of exhausting the stack.
pub const MAX_NESTING: usize = 128;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Significant tokens, always ending with `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Set while parsing an `if` condition, where `== {` opens a switch
    pub switch_condition: bool,
    /// Nesting depth of parameter lists, multi-value return lists need
    /// parentheses inside one
    pub parameter_depth: usize,
    /// Nested parse calls currently open, bounded by `MAX_NESTING`
    depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map(|token| token.span.end.0 as usize).unwrap_or(0);
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::new(), Span::new(end, end)));
        }

        Parser {
            tokens,
            pos: 0,
            switch_condition: false,
            parameter_depth: 0,
            depth: 0,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Token `offset` places ahead, `EOF` past the end.
    pub fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.peek(offset).kind
    }

    /// Advances to the next token and returns the previous one. Stays on
    /// `EOF` once it is reached.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            return Ok(self.advance());
        }

        Err(Error::new(
            ErrorImpl::ExpectedToken {
                expected: expected_kind.to_string(),
                found: self.describe_current(),
            },
            self.get_position(),
        ))
    }

    pub fn at_keyword(&self, keyword: Keyword) -> bool {
        self.current_token().keyword() == Some(keyword)
    }

    pub fn peek_keyword(&self, offset: usize) -> Option<Keyword> {
        self.peek(offset).keyword()
    }

    pub fn expect_keyword(&mut self, keyword: Keyword, spelling: &str) -> Result<Token, Error> {
        if self.at_keyword(keyword) {
            return Ok(self.advance());
        }

        Err(Error::new(
            ErrorImpl::ExpectedToken {
                expected: spelling.to_string(),
                found: self.describe_current(),
            },
            self.get_position(),
        ))
    }

    /// Consumes the current token into `builder` if it has `kind`.
    pub fn eat(&mut self, kind: TokenKind, builder: &mut NodeBuilder) -> bool {
        if self.current_token_kind() == kind {
            builder.token(self.advance());
            return true;
        }
        false
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Byte offset of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn rewind(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// True unless a line break precedes the current token.
    pub fn on_same_line(&self) -> bool {
        !self.current_token().starts_line()
    }

    /// Opens one nesting level. Every successful call pairs with `leave`.
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep { limit: MAX_NESTING },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth -= 1;
    }

    pub fn describe_current(&self) -> String {
        let token = self.current_token();
        match token.kind {
            TokenKind::EOF => String::from("end of input"),
            _ => token.value.clone(),
        }
    }

    pub fn unexpected(&self) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: self.describe_current(),
            },
            self.get_position(),
        )
    }
}

/// Parses a stream of significant tokens into a `source_file` node.
pub fn parse(tokens: Vec<Token>) -> SyntaxNode {
    let mut parser = Parser::new(tokens);
    let mut builder = NodeBuilder::new(NodeKind::SourceFile);

    parse_statement_list(&mut parser, &mut builder, ListEnd::EndOfInput);

    // EOF carries the trailing trivia.
    builder.token(parser.advance());

    let root = builder.finish();
    debug!("parsed source_file spanning {} bytes", root.span().len());
    root
}
