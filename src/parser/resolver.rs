//! Disambiguation policy.
//!
//! The grammar declares a fixed list of ambiguous rule sets. Each one has an
//! entry in [`CONFLICT_TABLE`] holding its decide function, how far that
//! function may look ahead and the alternatives it may pick. Decision points
//! call [`consult`] and branch on the returned [`Winner`]. A decision that
//! breaks its entry's bounds surfaces as `UnresolvedConflict` instead of a
//! silent guess.
//!
//! The statement classifier lives here too: it is where most of the
//! declaration/assignment/expression conflicts are decided.

use std::cell::Cell;

use log::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{
        directives::Directive,
        tokens::{Keyword, Token, TokenKind},
    },
};

use super::{parser::Parser, types::can_start_type};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Conflict {
    StructEnum,
    CallMember,
    DeclarationAssignment,
    TypeIdentifier,
    ExpressionCompositeLiteral,
    ParameterDeclaration,
    DirectiveType,
    DirectiveProcedureType,
    DeclarationExpression,
    TypeExpression,
    DirectiveStatementExpression,
    FunctionDeclarationExpression,
    DirectiveRange,
    ParameterExpression,
    CastRange,
    PointerType,
    StatementIf,
    StatementWhile,
    StatementFor,
    StatementDefer,
    ForArrayAccessUnary,
    ForMemberAccessUnary,
    ForBinary,
    TypeParameterExpression,
    TypeFunctionDeclaration,
    TypeStructDeclaration,
    TypeEnumDeclaration,
    FunctionDeclaration,
    ProcedureType,
    ProcedureTypeFunctionDeclaration,
    DirectiveFunctionDeclaration,
    DirectiveProcedureTypeFunctionDeclaration,
    TypeReturnType,
    ReturnTypeList,
}

/// The alternative a conflict resolved to. Decision points branch on it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Winner {
    Declaration,
    Assignment,
    Expression,
    Statement,
    Block,
    StructDeclaration,
    EnumDeclaration,
    FunctionDeclaration,
    FunctionCall,
    MemberAccess,
    CompositeLiteral,
    ArrayLiteral,
    Identifier,
    PrimitiveType,
    PolymorphicType,
    PointerType,
    ProcedureType,
    TypeExpression,
    ParameterDeclaration,
    DefaultValue,
    DirectiveExpression,
    DirectiveStatement,
    RangeExpression,
    CastExpression,
    ForMarker,
    Iterator,
    ReturnType,
    ReturnTypeList,
    ParameterList,
}

/// How far past the decision point an entry may look.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Lookahead {
    Fixed(usize),
    /// An `ident (, ident)*` run plus this many tokens after it.
    NameList(usize),
}

/// Read-only token access, shared by the parser and [`Window`].
pub trait Peek {
    /// Token `offset` places ahead, `EOF` past the end.
    fn token_at(&self, offset: usize) -> &Token;

    fn kind_at(&self, offset: usize) -> TokenKind {
        self.token_at(offset).kind
    }

    fn keyword_at(&self, offset: usize) -> Option<Keyword> {
        self.token_at(offset).keyword()
    }

    /// True unless a line break precedes the token at `offset`.
    fn shares_line(&self, offset: usize) -> bool {
        !self.token_at(offset).starts_line()
    }
}

impl Peek for Parser {
    fn token_at(&self, offset: usize) -> &Token {
        self.peek(offset)
    }
}

/// The parser as a decide function sees it: tokens from the decision point
/// on. Every peek is recorded so the entry's lookahead bound can be checked.
pub struct Window<'a> {
    parser: &'a Parser,
    base: usize,
    deepest: Cell<usize>,
}

impl<'a> Window<'a> {
    fn new(parser: &'a Parser, base: usize) -> Self {
        Window {
            parser,
            base,
            deepest: Cell::new(0),
        }
    }

    pub fn in_parameter_list(&self) -> bool {
        self.parser.parameter_depth > 0
    }
}

impl Peek for Window<'_> {
    fn token_at(&self, offset: usize) -> &Token {
        self.deepest.set(self.deepest.get().max(offset));
        self.parser.peek(self.base + offset)
    }
}

pub struct ConflictEntry {
    pub conflict: Conflict,
    /// The ambiguous rules, as the grammar names them.
    pub rules: &'static [&'static str],
    /// Token(s) whose presence decides the conflict.
    pub discriminator: &'static str,
    pub lookahead: Lookahead,
    /// Every alternative `decide` may pick.
    pub winners: &'static [Winner],
    pub decide: fn(&Window<'_>) -> Winner,
}

/// One entry per declared conflict, in grammar order.
pub static CONFLICT_TABLE: &[ConflictEntry] = &[
    ConflictEntry {
        conflict: Conflict::StructEnum,
        rules: &["struct_declaration", "enum_declaration"],
        discriminator: "keyword after `::`: struct/union or enum/enum_flags",
        lookahead: Lookahead::Fixed(0),
        winners: &[
            Winner::StructDeclaration,
            Winner::EnumDeclaration,
            Winner::Declaration,
        ],
        decide: decide_struct_enum,
    },
    ConflictEntry {
        conflict: Conflict::CallMember,
        rules: &["function_call", "member_access"],
        discriminator: "`(` on the same line after a member chain",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::FunctionCall, Winner::MemberAccess],
        decide: decide_call_member,
    },
    ConflictEntry {
        conflict: Conflict::DeclarationAssignment,
        rules: &["declaration", "assignment"],
        discriminator: "`:` or `::` after an identifier list",
        lookahead: Lookahead::NameList(1),
        winners: &[Winner::Declaration, Winner::Assignment],
        decide: decide_declaration_assignment,
    },
    ConflictEntry {
        conflict: Conflict::TypeIdentifier,
        rules: &["type_expression", "identifier"],
        discriminator: "primitive type name in type position",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::PrimitiveType, Winner::Identifier],
        decide: decide_type_identifier,
    },
    ConflictEntry {
        conflict: Conflict::ExpressionCompositeLiteral,
        rules: &["_expression", "composite_literal"],
        discriminator: "`{` or `[` directly after `.`",
        lookahead: Lookahead::Fixed(1),
        winners: &[
            Winner::CompositeLiteral,
            Winner::ArrayLiteral,
            Winner::MemberAccess,
        ],
        decide: decide_composite_literal,
    },
    ConflictEntry {
        conflict: Conflict::ParameterDeclaration,
        rules: &["parameter_declaration", "declaration"],
        discriminator: "`using` followed by a parameter name",
        lookahead: Lookahead::Fixed(1),
        winners: &[Winner::ParameterDeclaration, Winner::Identifier],
        decide: decide_using_parameter,
    },
    ConflictEntry {
        conflict: Conflict::DirectiveType,
        rules: &["directive_expression", "type_expression"],
        discriminator: "type on the directive's line",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::TypeExpression, Winner::DirectiveExpression],
        decide: decide_directive_type,
    },
    ConflictEntry {
        conflict: Conflict::DirectiveProcedureType,
        rules: &["directive_expression", "procedure_type"],
        discriminator: "procedure suffix directive after a signature",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::ProcedureType, Winner::DirectiveExpression],
        decide: decide_directive_procedure_type,
    },
    ConflictEntry {
        conflict: Conflict::DeclarationExpression,
        rules: &["declaration", "_expression"],
        discriminator: "no `:`/`::` after the identifier list",
        lookahead: Lookahead::NameList(1),
        winners: &[Winner::Declaration, Winner::Expression],
        decide: decide_declaration_expression,
    },
    ConflictEntry {
        conflict: Conflict::TypeExpression,
        rules: &["type_expression", "_expression"],
        discriminator: "`[`, `$` or a parameter list in expression position",
        lookahead: Lookahead::Fixed(3),
        winners: &[Winner::TypeExpression, Winner::Expression],
        decide: decide_type_expression,
    },
    ConflictEntry {
        conflict: Conflict::DirectiveStatementExpression,
        rules: &["directive_statement", "_expression"],
        discriminator: "directive at statement start",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::DirectiveStatement, Winner::Expression],
        decide: decide_directive_statement,
    },
    ConflictEntry {
        conflict: Conflict::FunctionDeclarationExpression,
        rules: &["function_declaration", "_expression"],
        discriminator: "`(` after `::` followed by `)`, `$`, `using`, `ident :`, `ident ,` or `ident )` + `->`/`{`/directive",
        lookahead: Lookahead::Fixed(3),
        winners: &[Winner::FunctionDeclaration, Winner::Expression],
        decide: decide_function_declaration_expression,
    },
    ConflictEntry {
        conflict: Conflict::DirectiveRange,
        rules: &["directive_expression", "range_expression"],
        discriminator: "`..` after a directive operand",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::RangeExpression, Winner::DirectiveExpression],
        decide: decide_directive_range,
    },
    ConflictEntry {
        conflict: Conflict::ParameterExpression,
        rules: &["parameter_declaration", "_expression"],
        discriminator: "`=` after a parameter type",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::DefaultValue, Winner::ParameterDeclaration],
        decide: decide_parameter_default,
    },
    ConflictEntry {
        conflict: Conflict::CastRange,
        rules: &["cast_expression", "range_expression"],
        discriminator: "`..` after a cast operand",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::RangeExpression, Winner::CastExpression],
        decide: decide_cast_range,
    },
    ConflictEntry {
        conflict: Conflict::PointerType,
        rules: &["pointer_type"],
        discriminator: "consecutive `*`",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::PointerType, Winner::TypeExpression],
        decide: decide_pointer_type,
    },
    ConflictEntry {
        conflict: Conflict::StatementIf,
        rules: &["_statement", "if_statement"],
        discriminator: "`{` after the condition or `else`",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::Block, Winner::Statement],
        decide: decide_body,
    },
    ConflictEntry {
        conflict: Conflict::StatementWhile,
        rules: &["_statement", "while_statement"],
        discriminator: "`{` after the condition",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::Block, Winner::Statement],
        decide: decide_body,
    },
    ConflictEntry {
        conflict: Conflict::StatementFor,
        rules: &["_statement", "for_statement"],
        discriminator: "`{` after the range",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::Block, Winner::Statement],
        decide: decide_body,
    },
    ConflictEntry {
        conflict: Conflict::StatementDefer,
        rules: &["_statement", "defer_statement"],
        discriminator: "`{` after defer",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::Block, Winner::Statement],
        decide: decide_body,
    },
    ConflictEntry {
        conflict: Conflict::ForArrayAccessUnary,
        rules: &["for_statement", "array_access", "unary_expression"],
        discriminator: "`*` directly after for",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::ForMarker, Winner::Expression],
        decide: decide_for_pointer_marker,
    },
    ConflictEntry {
        conflict: Conflict::ForMemberAccessUnary,
        rules: &["for_statement", "member_access", "unary_expression"],
        discriminator: "`:` after `ident` or `ident , ident`",
        lookahead: Lookahead::Fixed(3),
        winners: &[Winner::Iterator, Winner::Expression],
        decide: decide_for_iterator,
    },
    ConflictEntry {
        conflict: Conflict::ForBinary,
        rules: &["for_statement", "binary_expression"],
        discriminator: "`<` directly after for",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::ForMarker, Winner::Expression],
        decide: decide_for_reverse_marker,
    },
    ConflictEntry {
        conflict: Conflict::TypeParameterExpression,
        rules: &["type_expression", "parameter_declaration", "_expression"],
        discriminator: "token after the first identifier of a parameter",
        lookahead: Lookahead::Fixed(1),
        winners: &[
            Winner::PolymorphicType,
            Winner::ParameterDeclaration,
            Winner::TypeExpression,
        ],
        decide: decide_type_parameter,
    },
    ConflictEntry {
        conflict: Conflict::TypeFunctionDeclaration,
        rules: &["type_expression", "function_declaration"],
        discriminator: "#type followed by a signature after `::`",
        lookahead: Lookahead::Fixed(5),
        winners: &[Winner::FunctionDeclaration, Winner::TypeExpression],
        decide: decide_type_function_declaration,
    },
    ConflictEntry {
        conflict: Conflict::TypeStructDeclaration,
        rules: &["type_expression", "struct_declaration"],
        discriminator: "`{`, `(` or a directive after struct/union",
        lookahead: Lookahead::Fixed(1),
        winners: &[Winner::StructDeclaration, Winner::TypeExpression],
        decide: decide_struct_declaration,
    },
    ConflictEntry {
        conflict: Conflict::TypeEnumDeclaration,
        rules: &["type_expression", "enum_declaration"],
        discriminator: "`{`, a directive or a base type after enum/enum_flags",
        lookahead: Lookahead::Fixed(1),
        winners: &[Winner::EnumDeclaration, Winner::TypeExpression],
        decide: decide_enum_declaration,
    },
    ConflictEntry {
        conflict: Conflict::FunctionDeclaration,
        rules: &["function_declaration"],
        discriminator: "`{` after the signature",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::Block, Winner::FunctionDeclaration],
        decide: decide_function_body,
    },
    ConflictEntry {
        conflict: Conflict::ProcedureType,
        rules: &["procedure_type"],
        discriminator: "directive on the signature's line",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::ProcedureType, Winner::Statement],
        decide: decide_procedure_type,
    },
    ConflictEntry {
        conflict: Conflict::ProcedureTypeFunctionDeclaration,
        rules: &["procedure_type", "function_declaration"],
        discriminator: "`;` after a signature with no body",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::FunctionDeclaration, Winner::ProcedureType],
        decide: decide_bodiless_function,
    },
    ConflictEntry {
        conflict: Conflict::DirectiveFunctionDeclaration,
        rules: &["directive_expression", "function_declaration"],
        discriminator: "procedure suffix on any line, other directives on the signature's line",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::FunctionDeclaration, Winner::Statement],
        decide: decide_directive_function_declaration,
    },
    ConflictEntry {
        conflict: Conflict::DirectiveProcedureTypeFunctionDeclaration,
        rules: &["directive_expression", "procedure_type", "function_declaration"],
        discriminator: "inline/no_inline followed by a parameter list",
        lookahead: Lookahead::Fixed(4),
        winners: &[Winner::ProcedureType, Winner::Expression],
        decide: decide_inline_procedure,
    },
    ConflictEntry {
        conflict: Conflict::TypeReturnType,
        rules: &["type_expression", "return_type"],
        discriminator: "`ident :` after `->`",
        lookahead: Lookahead::Fixed(1),
        winners: &[Winner::ReturnType, Winner::TypeExpression],
        decide: decide_return_type,
    },
    ConflictEntry {
        conflict: Conflict::ReturnTypeList,
        rules: &["return_type_list"],
        discriminator: "`,` after a return type inside a parameter list",
        lookahead: Lookahead::Fixed(0),
        winners: &[Winner::ParameterList, Winner::ReturnTypeList],
        decide: decide_return_type_list,
    },
];

/// Resolves `conflict` at the current token.
pub fn consult(parser: &Parser, conflict: Conflict) -> Result<Winner, Error> {
    consult_at(parser, conflict, 0)
}

/// Resolves `conflict` at the token `offset` places ahead.
pub fn consult_at(parser: &Parser, conflict: Conflict, offset: usize) -> Result<Winner, Error> {
    match CONFLICT_TABLE.iter().find(|entry| entry.conflict == conflict) {
        Some(entry) => resolve(entry, parser, offset),
        None => Err(Error::new(
            ErrorImpl::UnresolvedConflict {
                rules: format!("{:?}", conflict),
            },
            parser.peek(offset).span.start,
        )),
    }
}

/// Runs `entry` against the tokens at `offset`. A decision that looks
/// further than the entry allows, or picks an alternative the entry does not
/// list, is unresolved.
pub fn resolve(entry: &ConflictEntry, parser: &Parser, offset: usize) -> Result<Winner, Error> {
    let window = Window::new(parser, offset);
    let winner = (entry.decide)(&window);
    let position = parser.peek(offset).span.start;

    let bound = match entry.lookahead {
        Lookahead::Fixed(tokens) => tokens,
        Lookahead::NameList(tokens) => name_run(parser, offset) + tokens,
    };

    if window.deepest.get() > bound || !entry.winners.contains(&winner) {
        return Err(Error::new(
            ErrorImpl::UnresolvedConflict {
                rules: entry.rules.join(", "),
            },
            position,
        ));
    }

    trace!("{:?} at byte {}: {:?}", entry.conflict, position.0, winner);
    Ok(winner)
}

fn decide_struct_enum(window: &Window) -> Winner {
    match window.keyword_at(0) {
        Some(Keyword::Struct | Keyword::Union) => Winner::StructDeclaration,
        Some(Keyword::Enum | Keyword::EnumFlags) => Winner::EnumDeclaration,
        _ => Winner::Declaration,
    }
}

fn decide_call_member(window: &Window) -> Winner {
    if window.kind_at(0) == TokenKind::OpenParen && window.shares_line(0) {
        Winner::FunctionCall
    } else {
        Winner::MemberAccess
    }
}

fn decide_declaration_assignment(window: &Window) -> Winner {
    match scan_name_list(window, 0) {
        Some(_) => Winner::Declaration,
        None => Winner::Assignment,
    }
}

fn decide_declaration_expression(window: &Window) -> Winner {
    match scan_name_list(window, 0) {
        Some(_) => Winner::Declaration,
        None => Winner::Expression,
    }
}

fn decide_type_identifier(window: &Window) -> Winner {
    let token = window.token_at(0);
    let struct_like = matches!(
        token.keyword(),
        Some(Keyword::Struct | Keyword::Union | Keyword::Enum | Keyword::EnumFlags)
    );

    if token.kind == TokenKind::Identifier && (token.is_primitive_type() || struct_like) {
        Winner::PrimitiveType
    } else {
        Winner::Identifier
    }
}

fn decide_composite_literal(window: &Window) -> Winner {
    match window.kind_at(1) {
        TokenKind::OpenCurly => Winner::CompositeLiteral,
        TokenKind::OpenBracket => Winner::ArrayLiteral,
        _ => Winner::MemberAccess,
    }
}

fn decide_using_parameter(window: &Window) -> Winner {
    if window.keyword_at(0) == Some(Keyword::Using)
        && matches!(window.kind_at(1), TokenKind::Identifier | TokenKind::Dollar)
    {
        Winner::ParameterDeclaration
    } else {
        Winner::Identifier
    }
}

fn decide_directive_type(window: &Window) -> Winner {
    if window.shares_line(0) && can_start_type(window) {
        Winner::TypeExpression
    } else {
        Winner::DirectiveExpression
    }
}

fn decide_directive_procedure_type(window: &Window) -> Winner {
    match window.token_at(0).directive() {
        Some(directive) if directive.is_procedure_suffix() => Winner::ProcedureType,
        _ => Winner::DirectiveExpression,
    }
}

fn decide_type_expression(window: &Window) -> Winner {
    match window.kind_at(0) {
        TokenKind::OpenBracket | TokenKind::Dollar => Winner::TypeExpression,
        TokenKind::OpenParen if looks_like_procedure(window, 0) => Winner::TypeExpression,
        _ => Winner::Expression,
    }
}

fn decide_directive_statement(window: &Window) -> Winner {
    match window.kind_at(0) {
        TokenKind::Directive(Directive::String) => Winner::Expression,
        _ => Winner::DirectiveStatement,
    }
}

fn decide_function_declaration_expression(window: &Window) -> Winner {
    if looks_like_procedure(window, 0) {
        Winner::FunctionDeclaration
    } else {
        Winner::Expression
    }
}

fn decide_directive_range(window: &Window) -> Winner {
    match window.kind_at(0) {
        TokenKind::DotDot => Winner::RangeExpression,
        _ => Winner::DirectiveExpression,
    }
}

fn decide_parameter_default(window: &Window) -> Winner {
    match window.kind_at(0) {
        TokenKind::Assignment => Winner::DefaultValue,
        _ => Winner::ParameterDeclaration,
    }
}

fn decide_cast_range(window: &Window) -> Winner {
    match window.kind_at(0) {
        TokenKind::DotDot => Winner::RangeExpression,
        _ => Winner::CastExpression,
    }
}

fn decide_pointer_type(window: &Window) -> Winner {
    match window.kind_at(0) {
        TokenKind::Star => Winner::PointerType,
        _ => Winner::TypeExpression,
    }
}

fn decide_body(window: &Window) -> Winner {
    match window.kind_at(0) {
        TokenKind::OpenCurly => Winner::Block,
        _ => Winner::Statement,
    }
}

fn decide_for_pointer_marker(window: &Window) -> Winner {
    match window.kind_at(0) {
        TokenKind::Star => Winner::ForMarker,
        _ => Winner::Expression,
    }
}

fn decide_for_reverse_marker(window: &Window) -> Winner {
    match window.kind_at(0) {
        TokenKind::Less => Winner::ForMarker,
        _ => Winner::Expression,
    }
}

/// `ident :` or `ident , ident :` right at the cursor.
fn decide_for_iterator(window: &Window) -> Winner {
    if window.kind_at(0) != TokenKind::Identifier {
        return Winner::Expression;
    }

    let named = match window.kind_at(1) {
        TokenKind::Colon => true,
        TokenKind::Comma => {
            window.kind_at(2) == TokenKind::Identifier && window.kind_at(3) == TokenKind::Colon
        }
        _ => false,
    };

    if named {
        Winner::Iterator
    } else {
        Winner::Expression
    }
}

fn decide_type_parameter(window: &Window) -> Winner {
    let token = window.token_at(0);

    match token.kind {
        TokenKind::Dollar => Winner::PolymorphicType,
        TokenKind::Identifier
            if !token.is_primitive_type()
                && matches!(
                    window.kind_at(1),
                    TokenKind::Colon
                        | TokenKind::Comma
                        | TokenKind::CloseParen
                        | TokenKind::Assignment
                ) =>
        {
            Winner::ParameterDeclaration
        }
        _ => Winner::TypeExpression,
    }
}

fn decide_type_function_declaration(window: &Window) -> Winner {
    if type_signature_follows(window, 1) {
        Winner::FunctionDeclaration
    } else {
        Winner::TypeExpression
    }
}

fn decide_struct_declaration(window: &Window) -> Winner {
    match window.kind_at(1) {
        TokenKind::OpenCurly | TokenKind::OpenParen | TokenKind::Directive(_) => {
            Winner::StructDeclaration
        }
        _ => Winner::TypeExpression,
    }
}

fn decide_enum_declaration(window: &Window) -> Winner {
    match window.kind_at(1) {
        TokenKind::OpenCurly | TokenKind::Directive(_) | TokenKind::Identifier => {
            Winner::EnumDeclaration
        }
        _ => Winner::TypeExpression,
    }
}

fn decide_function_body(window: &Window) -> Winner {
    match window.kind_at(0) {
        TokenKind::OpenCurly => Winner::Block,
        _ => Winner::FunctionDeclaration,
    }
}

fn decide_procedure_type(window: &Window) -> Winner {
    if window.token_at(0).directive().is_some() && window.shares_line(0) {
        Winner::ProcedureType
    } else {
        Winner::Statement
    }
}

fn decide_bodiless_function(window: &Window) -> Winner {
    match window.kind_at(0) {
        TokenKind::Semicolon => Winner::FunctionDeclaration,
        _ => Winner::ProcedureType,
    }
}

fn decide_directive_function_declaration(window: &Window) -> Winner {
    let attaches = match window.token_at(0).directive() {
        Some(directive) => {
            directive.is_procedure_suffix()
                || (directive.is_expression()
                    && directive != Directive::String
                    && window.shares_line(0))
        }
        None => false,
    };

    if attaches {
        Winner::FunctionDeclaration
    } else {
        Winner::Statement
    }
}

fn decide_inline_procedure(window: &Window) -> Winner {
    if looks_like_procedure(window, 1) {
        Winner::ProcedureType
    } else {
        Winner::Expression
    }
}

fn decide_return_type(window: &Window) -> Winner {
    if window.kind_at(0) == TokenKind::Identifier && window.kind_at(1) == TokenKind::Colon {
        Winner::ReturnType
    } else {
        Winner::TypeExpression
    }
}

fn decide_return_type_list(window: &Window) -> Winner {
    if window.in_parameter_list() {
        Winner::ParameterList
    } else {
        Winner::ReturnTypeList
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatementShape {
    LexicalError,
    /// A bare `;`, kept as a leaf of the enclosing node.
    Empty,
    Block,
    Annotated,
    Import,
    Load,
    Asm,
    Scope,
    CompileTimeIf,
    Directive,
    Keyword(Keyword),
    Operator,
    Declaration(DeclarationShape),
    ExpressionList,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DeclarationShape {
    Struct,
    Enum,
    Function,
    Bake,
    ForeignLibrary,
    Import,
    General,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct NameList {
    pub names: usize,
    /// Offset of the `:`/`::` token.
    pub colon_offset: usize,
    pub colon: TokenKind,
}

pub fn is_statement_keyword(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::If
            | Keyword::Ifx
            | Keyword::While
            | Keyword::For
            | Keyword::Return
            | Keyword::Break
            | Keyword::Continue
            | Keyword::Defer
            | Keyword::Remove
            | Keyword::Using
            | Keyword::Case
    )
}

/// A keyword followed by `:`, `::`, `,` or an assignment operator is used
/// as a plain name (`remove := false;`). `using ,map` is the exception.
pub fn keyword_acts_as_name(peek: &impl Peek, offset: usize) -> bool {
    let next = peek.kind_at(offset + 1);

    if next == TokenKind::Comma && peek.keyword_at(offset) == Some(Keyword::Using) {
        return !matches!(
            peek.keyword_at(offset + 2),
            Some(Keyword::Map | Keyword::Except | Keyword::Only)
        );
    }

    matches!(
        next,
        TokenKind::Colon | TokenKind::ColonColon | TokenKind::Comma
    ) || next.is_assignment_operator()
}

/// `cast`, `xx` and `inline` are names when nothing that could be their
/// operand follows.
pub fn prefix_keyword_is_name(peek: &impl Peek) -> bool {
    let next = peek.kind_at(1);

    // cast,trunc(T) x
    if next == TokenKind::Comma
        && peek.keyword_at(0) == Some(Keyword::Cast)
        && matches!(peek.keyword_at(2), Some(Keyword::Trunc | Keyword::NoCheck))
    {
        return false;
    }

    next.is_assignment_operator()
        || matches!(
            next,
            TokenKind::Colon
                | TokenKind::ColonColon
                | TokenKind::Comma
                | TokenKind::CloseParen
                | TokenKind::CloseBracket
                | TokenKind::CloseCurly
                | TokenKind::Semicolon
                | TokenKind::Dot
                | TokenKind::EOF
        )
}

/// Tokens in the `ident (, ident)*` run starting at `offset`.
fn name_run(peek: &impl Peek, offset: usize) -> usize {
    if peek.kind_at(offset) != TokenKind::Identifier {
        return 0;
    }

    let mut end = offset + 1;
    while peek.kind_at(end) == TokenKind::Comma && peek.kind_at(end + 1) == TokenKind::Identifier
    {
        end += 2;
    }
    end - offset
}

/// Matches `ident (, ident)*` followed by `:` or `::`, starting `offset`
/// tokens ahead.
pub fn scan_name_list(peek: &impl Peek, offset: usize) -> Option<NameList> {
    let run = name_run(peek, offset);
    if run == 0 {
        return None;
    }

    let colon_offset = offset + run;
    match peek.kind_at(colon_offset) {
        colon @ (TokenKind::Colon | TokenKind::ColonColon) => Some(NameList {
            names: (run + 1) / 2,
            colon_offset,
            colon,
        }),
        _ => None,
    }
}

/// True when the `(` at `offset` opens a parameter list rather than a
/// parenthesised expression.
pub fn looks_like_procedure(peek: &impl Peek, offset: usize) -> bool {
    if peek.kind_at(offset) != TokenKind::OpenParen {
        return false;
    }

    let first = peek.token_at(offset + 1);
    match first.kind {
        TokenKind::CloseParen | TokenKind::Dollar => true,
        TokenKind::Identifier => {
            if first.keyword() == Some(Keyword::Using)
                && matches!(
                    peek.kind_at(offset + 2),
                    TokenKind::Identifier | TokenKind::Dollar
                )
            {
                return true;
            }

            match peek.kind_at(offset + 2) {
                TokenKind::Colon | TokenKind::Comma => true,
                TokenKind::CloseParen => matches!(
                    peek.kind_at(offset + 3),
                    TokenKind::Arrow | TokenKind::OpenCurly | TokenKind::Directive(_)
                ),
                _ => false,
            }
        }
        _ => false,
    }
}

fn type_signature_follows(peek: &impl Peek, offset: usize) -> bool {
    match peek.keyword_at(offset) {
        Some(Keyword::Inline | Keyword::NoInline) => looks_like_procedure(peek, offset + 1),
        _ => looks_like_procedure(peek, offset),
    }
}

pub fn for_has_iterator(parser: &Parser) -> Result<bool, Error> {
    Ok(consult(parser, Conflict::ForMemberAccessUnary)? == Winner::Iterator)
}

pub fn classify_statement(parser: &Parser) -> Result<StatementShape, Error> {
    let token = parser.current_token();

    let shape = match token.kind {
        TokenKind::Error => StatementShape::LexicalError,
        TokenKind::Semicolon => StatementShape::Empty,
        TokenKind::OpenCurly => StatementShape::Block,
        TokenKind::At => StatementShape::Annotated,
        TokenKind::Directive(directive) => {
            match consult(parser, Conflict::DirectiveStatementExpression)? {
                Winner::Expression => StatementShape::ExpressionList,
                _ => match directive {
                    d if d.is_import() => StatementShape::Import,
                    Directive::Load => StatementShape::Load,
                    Directive::Asm => StatementShape::Asm,
                    d if d.is_scope() => StatementShape::Scope,
                    Directive::If | Directive::Ifx => StatementShape::CompileTimeIf,
                    _ => StatementShape::Directive,
                },
            }
        }
        TokenKind::Identifier => classify_identifier_statement(parser)?,
        _ => StatementShape::ExpressionList,
    };

    Ok(shape)
}

fn classify_identifier_statement(parser: &Parser) -> Result<StatementShape, Error> {
    if let Some(keyword) = parser.current_token().keyword() {
        if is_statement_keyword(keyword) && !keyword_acts_as_name(parser, 0) {
            return Ok(StatementShape::Keyword(keyword));
        }

        if keyword == Keyword::Operator && parser.peek_kind(1).is_overloadable() {
            return Ok(StatementShape::Operator);
        }
    }

    match consult(parser, Conflict::DeclarationAssignment)? {
        Winner::Declaration => Ok(StatementShape::Declaration(declaration_shape(parser)?)),
        _ => Ok(StatementShape::ExpressionList),
    }
}

/// Shape of the `names :` or `names ::` declaration at the cursor.
pub fn declaration_shape(parser: &Parser) -> Result<DeclarationShape, Error> {
    match scan_name_list(parser, 0) {
        Some(names) if names.colon == TokenKind::ColonColon => classify_declaration(parser, names),
        _ => Ok(DeclarationShape::General),
    }
}

/// Decides what a `names ::` statement declares from the tokens after `::`.
pub fn classify_declaration(parser: &Parser, names: NameList) -> Result<DeclarationShape, Error> {
    let offset = names.colon_offset + 1;

    let shape = match consult_at(parser, Conflict::StructEnum, offset)? {
        Winner::StructDeclaration => {
            match consult_at(parser, Conflict::TypeStructDeclaration, offset)? {
                Winner::StructDeclaration => DeclarationShape::Struct,
                _ => DeclarationShape::General,
            }
        }
        Winner::EnumDeclaration => {
            match consult_at(parser, Conflict::TypeEnumDeclaration, offset)? {
                Winner::EnumDeclaration => DeclarationShape::Enum,
                _ => DeclarationShape::General,
            }
        }
        _ => classify_declared_value(parser, offset)?,
    };

    if shape != DeclarationShape::General && names.names > 1 {
        return Ok(DeclarationShape::General);
    }

    Ok(shape)
}

fn classify_declared_value(parser: &Parser, offset: usize) -> Result<DeclarationShape, Error> {
    let next = parser.peek(offset);

    let procedure_if = |conflict: Conflict, winner: Winner| -> Result<DeclarationShape, Error> {
        if consult_at(parser, conflict, offset)? == winner {
            Ok(DeclarationShape::Function)
        } else {
            Ok(DeclarationShape::General)
        }
    };

    match (next.keyword(), next.kind) {
        (Some(Keyword::Inline | Keyword::NoInline), _) => procedure_if(
            Conflict::DirectiveProcedureTypeFunctionDeclaration,
            Winner::ProcedureType,
        ),
        (_, TokenKind::Directive(directive)) if directive.is_bake() => Ok(DeclarationShape::Bake),
        (_, TokenKind::Directive(Directive::ForeignLibrary | Directive::ForeignSystemLibrary)) => {
            Ok(DeclarationShape::ForeignLibrary)
        }
        (_, TokenKind::Directive(directive)) if directive.is_import() => {
            Ok(DeclarationShape::Import)
        }
        (_, TokenKind::Directive(Directive::Type)) => procedure_if(
            Conflict::TypeFunctionDeclaration,
            Winner::FunctionDeclaration,
        ),
        (_, TokenKind::OpenParen) => procedure_if(
            Conflict::FunctionDeclarationExpression,
            Winner::FunctionDeclaration,
        ),
        _ => Ok(DeclarationShape::General),
    }
}
