use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    cst::cst::SyntaxNode,
    errors::errors::Error,
    lexer::{
        directives::Directive,
        tokens::{Keyword, TokenKind},
    },
};

use super::{expr::*, parser::Parser, stmt::*, types::create_token_type_lookups};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    LogicalOr,
    LogicalAnd,
    Relational,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Member,
    Call,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<SyntaxNode, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<SyntaxNode, Error>;
pub type LEDHandler = fn(&mut Parser, SyntaxNode, BindingPower) -> Result<SyntaxNode, Error>;
pub type TypeNUDHandler = fn(&mut Parser) -> Result<SyntaxNode, Error>;

// Lookup tables are shared by every parse, so they live in one static
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type KeywordStmtLookup = HashMap<Keyword, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type KeywordNUDLookup = HashMap<Keyword, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

#[derive(Default)]
pub struct Lookups {
    pub stmt_lookup: StmtLookup,
    pub keyword_stmt_lookup: KeywordStmtLookup,
    pub nud_lookup: NUDLookup,
    pub keyword_nud_lookup: KeywordNUDLookup,
    pub led_lookup: LEDLookup,
    pub binding_power_lookup: BPLookup,
    pub type_nud_lookup: TypeNUDLookup,
}

impl Lookups {
    /// Registers a left denotation (infix or postfix) handler.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation handler. Prefix tokens get no binding
    /// power, so a statement ending without `;` does not swallow the next one.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn keyword_nud(&mut self, keyword: Keyword, nud_fn: NUDHandler) {
        self.keyword_nud_lookup.insert(keyword, nud_fn);
    }

    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn keyword_stmt(&mut self, keyword: Keyword, stmt_fn: StmtHandler) {
        self.keyword_stmt_lookup.insert(keyword, stmt_fn);
    }

    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }
}

lazy_static! {
    pub static ref LOOKUPS: Lookups = {
        let mut lookups = Lookups::default();
        create_token_lookups(&mut lookups);
        create_token_type_lookups(&mut lookups);
        lookups
    };
}

pub fn create_token_lookups(lookups: &mut Lookups) {
    // Logical
    lookups.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    lookups.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Relational
    lookups.led(TokenKind::Equals, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::NotEquals, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);

    // Bitwise
    lookups.led(TokenKind::Pipe, BindingPower::BitOr, parse_binary_expr);
    lookups.led(TokenKind::Caret, BindingPower::BitXor, parse_binary_expr);
    lookups.led(TokenKind::Ampersand, BindingPower::BitAnd, parse_binary_expr);
    lookups.led(TokenKind::ShiftLeft, BindingPower::Shift, parse_binary_expr);
    lookups.led(TokenKind::ShiftRight, BindingPower::Shift, parse_binary_expr);

    // Additive and multiplicative
    lookups.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    lookups.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    lookups.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    // Postfix
    lookups.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);
    lookups.led(TokenKind::OpenBracket, BindingPower::Member, parse_array_access_expr);
    lookups.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);

    // Literals and symbols
    lookups.nud(TokenKind::Identifier, parse_primary_expr);
    lookups.nud(TokenKind::Number, parse_primary_expr);
    lookups.nud(TokenKind::Uninitialized, parse_primary_expr);
    lookups.nud(TokenKind::DoubleQuote, parse_string_literal);
    lookups.nud(TokenKind::Directive(Directive::String), parse_here_string);
    lookups.nud(TokenKind::Error, parse_lexical_error);
    lookups.nud(TokenKind::OpenParen, parse_grouping_expr);
    lookups.nud(TokenKind::Dot, parse_leading_dot_expr);
    lookups.nud(TokenKind::At, parse_annotation);

    // Prefix operators
    lookups.nud(TokenKind::Dash, parse_prefix_expr);
    lookups.nud(TokenKind::Not, parse_prefix_expr);
    lookups.nud(TokenKind::Tilde, parse_prefix_expr);
    lookups.nud(TokenKind::Star, parse_prefix_expr);
    lookups.nud(TokenKind::Ampersand, parse_prefix_expr);
    lookups.nud(TokenKind::ShiftLeft, parse_prefix_expr);

    // Types in expression position
    lookups.nud(TokenKind::OpenBracket, parse_type_expr);
    lookups.nud(TokenKind::Dollar, parse_type_expr);

    for directive in Directive::ALL {
        if directive.is_expression() && directive != Directive::String {
            lookups.nud(TokenKind::Directive(directive), parse_directive_expr);
        }
    }

    // Keywords that start an expression
    lookups.keyword_nud(Keyword::True, parse_keyword_literal);
    lookups.keyword_nud(Keyword::False, parse_keyword_literal);
    lookups.keyword_nud(Keyword::Null, parse_keyword_literal);
    lookups.keyword_nud(Keyword::Cast, parse_cast_expr);
    lookups.keyword_nud(Keyword::Xx, parse_cast_expr);
    lookups.keyword_nud(Keyword::Inline, parse_inline_expr);
    lookups.keyword_nud(Keyword::NoInline, parse_inline_expr);
    lookups.keyword_nud(Keyword::Ifx, parse_ifx_expr);

    // Statements
    lookups.stmt(TokenKind::OpenCurly, parse_block_stmt);
    lookups.stmt(TokenKind::At, parse_annotated_stmt);
    lookups.stmt(TokenKind::Error, parse_lexical_error);
    lookups.keyword_stmt(Keyword::If, parse_if_stmt);
    lookups.keyword_stmt(Keyword::Ifx, parse_if_stmt);
    lookups.keyword_stmt(Keyword::While, parse_while_stmt);
    lookups.keyword_stmt(Keyword::For, parse_for_stmt);
    lookups.keyword_stmt(Keyword::Return, parse_return_stmt);
    lookups.keyword_stmt(Keyword::Break, parse_break_stmt);
    lookups.keyword_stmt(Keyword::Continue, parse_break_stmt);
    lookups.keyword_stmt(Keyword::Defer, parse_defer_stmt);
    lookups.keyword_stmt(Keyword::Remove, parse_remove_stmt);
    lookups.keyword_stmt(Keyword::Using, parse_using_stmt);
    lookups.keyword_stmt(Keyword::Case, parse_case_stmt);
}
