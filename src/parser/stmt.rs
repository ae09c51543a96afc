use crate::{
    cst::{
        cst::{leaf_node, NodeBuilder, SyntaxNode},
        kinds::{Field, NodeKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        directives::Directive,
        tokens::{Keyword, TokenKind},
    },
};

use super::{
    expr::{
        can_start_expression, parse_annotation, parse_argument_list, parse_directive_expr,
        parse_expr, parse_identifier, parse_range_expr, parse_string,
    },
    lookups::{BindingPower, LOOKUPS},
    parser::Parser,
    recovery::parse_or_recover,
    resolver::{
        classify_statement, consult, declaration_shape, for_has_iterator, keyword_acts_as_name,
        scan_name_list, Conflict, DeclarationShape, StatementShape, Winner,
    },
    types::{can_start_type, parse_parameters, parse_signature, parse_type},
};

/// What closes a statement list.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ListEnd {
    EndOfInput,
    CloseCurly,
    /// A `case` body, also closed by the next `case`
    NextCase,
}

pub fn parse_statement_list(parser: &mut Parser, builder: &mut NodeBuilder, end: ListEnd) {
    loop {
        match parser.current_token_kind() {
            TokenKind::EOF => break,
            TokenKind::CloseCurly if end != ListEnd::EndOfInput => break,
            TokenKind::Semicolon => {
                builder.token(parser.advance());
                continue;
            }
            _ => {}
        }

        if end == ListEnd::NextCase
            && parser.at_keyword(Keyword::Case)
            && !keyword_acts_as_name(parser, 0)
        {
            break;
        }

        let field = match end {
            ListEnd::NextCase => Some(Field::Body),
            _ => None,
        };
        parse_or_recover(parser, builder, field, parse_stmt);
    }
}

pub fn parse_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    parser.enter()?;
    let result = parse_stmt_inner(parser);
    parser.leave();
    result
}

fn parse_stmt_inner(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    match classify_statement(parser)? {
        StatementShape::LexicalError | StatementShape::Block | StatementShape::Annotated => {
            match LOOKUPS.stmt_lookup.get(&parser.current_token_kind()) {
                Some(handler) => handler(parser),
                None => Err(parser.unexpected()),
            }
        }
        StatementShape::Keyword(keyword) => match LOOKUPS.keyword_stmt_lookup.get(&keyword) {
            Some(handler) => handler(parser),
            None => Err(parser.unexpected()),
        },
        StatementShape::Empty => Err(parser.unexpected()),
        StatementShape::Import => parse_import(parser, Vec::new(), false),
        StatementShape::Load => parse_load_stmt(parser),
        StatementShape::Asm => parse_asm_block(parser),
        StatementShape::Scope => parse_scope_stmt(parser),
        StatementShape::CompileTimeIf => parse_compile_time_if(parser),
        StatementShape::Directive => parse_directive_stmt(parser),
        StatementShape::Operator => parse_function_decl(parser, Vec::new()),
        StatementShape::Declaration(shape) => parse_declaration(parser, shape, Vec::new()),
        StatementShape::ExpressionList => parse_expression_list_stmt(parser),
    }
}

/// Nodes that start with already-parsed annotations.
fn begin(kind: NodeKind, annotations: Vec<SyntaxNode>) -> NodeBuilder {
    let mut builder = NodeBuilder::new(kind);
    for annotation in annotations {
        builder.node(annotation);
    }
    builder
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::Block);
    builder.token(parser.expect(TokenKind::OpenCurly)?);

    parser.enter()?;
    let previous = parser.switch_condition;
    parser.switch_condition = false;
    parse_statement_list(parser, &mut builder, ListEnd::CloseCurly);
    parser.switch_condition = previous;
    parser.leave();

    builder.token(parser.expect(TokenKind::CloseCurly)?);
    Ok(builder.finish())
}

/// Block or a single statement, as the body of a control-flow statement.
fn parse_body(parser: &mut Parser, conflict: Conflict) -> Result<SyntaxNode, Error> {
    match consult(parser, conflict)? {
        Winner::Block => parse_block_stmt(parser),
        _ => parse_stmt(parser),
    }
}

/// Notes in front of a declaration belong to it, anywhere else they are
/// expressions of their own.
pub fn parse_annotated_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let start = parser.pos();

    let mut annotations = Vec::new();
    while parser.current_token_kind() == TokenKind::At {
        annotations.push(parse_annotation(parser)?);
    }

    if parser.at_keyword(Keyword::Operator) && parser.peek_kind(1).is_overloadable() {
        return parse_function_decl(parser, annotations);
    }

    if consult(parser, Conflict::DeclarationAssignment)? == Winner::Declaration {
        let shape = declaration_shape(parser)?;
        return parse_declaration(parser, shape, annotations);
    }

    parser.rewind(start);
    parse_expression_list_stmt(parser)
}

fn parse_declaration(
    parser: &mut Parser,
    shape: DeclarationShape,
    annotations: Vec<SyntaxNode>,
) -> Result<SyntaxNode, Error> {
    match shape {
        DeclarationShape::Struct => parse_struct_decl(parser, annotations),
        DeclarationShape::Enum => parse_enum_decl(parser, annotations),
        DeclarationShape::Function | DeclarationShape::Bake => {
            parse_function_decl(parser, annotations)
        }
        DeclarationShape::ForeignLibrary => parse_foreign_library(parser, annotations),
        DeclarationShape::Import => parse_import(parser, annotations, true),
        DeclarationShape::General => parse_general_decl(parser, annotations),
    }
}

/// `a, b : T = x, y;`, `N :: 4;` and `p := foo();`
fn parse_general_decl(
    parser: &mut Parser,
    annotations: Vec<SyntaxNode>,
) -> Result<SyntaxNode, Error> {
    let mut builder = begin(NodeKind::Declaration, annotations);

    loop {
        builder.field(Field::Name, parse_identifier(parser)?);
        if !parser.eat(TokenKind::Comma, &mut builder) {
            break;
        }
    }

    match parser.current_token_kind() {
        TokenKind::ColonColon => {
            builder.token(parser.advance());
            parse_declaration_values(parser, &mut builder)?;
        }
        TokenKind::Colon => {
            builder.token(parser.advance());

            let has_value = |parser: &Parser| {
                matches!(
                    parser.current_token_kind(),
                    TokenKind::Assignment | TokenKind::Colon
                )
            };

            if !has_value(parser) && can_start_type(parser) {
                builder.field(Field::Type, parse_type(parser)?);
            }

            if has_value(parser) {
                builder.token(parser.advance());
                parse_declaration_values(parser, &mut builder)?;
            }
        }
        _ => {
            return Err(Error::new(
                ErrorImpl::ExpectedToken {
                    expected: String::from(":"),
                    found: parser.describe_current(),
                },
                parser.get_position(),
            ))
        }
    }

    parser.eat(TokenKind::Semicolon, &mut builder);
    Ok(builder.finish())
}

fn parse_declaration_values(parser: &mut Parser, builder: &mut NodeBuilder) -> Result<(), Error> {
    loop {
        builder.field(Field::Value, parse_expr(parser, BindingPower::Default)?);
        if !parser.eat(TokenKind::Comma, builder) {
            break;
        }
    }
    Ok(())
}

/// Directives on the same line as what they modify, e.g.
/// `struct #type_info_none` or `x: int #align 64;`
fn parse_trailing_directives(parser: &mut Parser, builder: &mut NodeBuilder) -> Result<(), Error> {
    while let Some(directive) = parser.current_token().directive() {
        if !directive.is_expression() || directive == Directive::String || !parser.on_same_line() {
            break;
        }
        builder.node(parse_directive_expr(parser)?);
    }
    Ok(())
}

fn parse_struct_decl(
    parser: &mut Parser,
    annotations: Vec<SyntaxNode>,
) -> Result<SyntaxNode, Error> {
    let mut builder = begin(NodeKind::StructDeclaration, annotations);
    builder.field(Field::Name, parse_identifier(parser)?);
    builder.token(parser.expect(TokenKind::ColonColon)?);

    // struct or union
    builder.token(parser.advance());

    if parser.current_token_kind() == TokenKind::OpenParen {
        parse_parameters(parser, &mut builder)?;
    }

    parse_trailing_directives(parser, &mut builder)?;
    builder.field(Field::Body, parse_struct_body(parser)?);

    Ok(builder.finish())
}

fn parse_struct_body(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::StructBody);
    builder.token(parser.expect(TokenKind::OpenCurly)?);

    loop {
        match parser.current_token_kind() {
            TokenKind::CloseCurly | TokenKind::EOF => break,
            TokenKind::Semicolon => {
                builder.token(parser.advance());
            }
            _ => parse_or_recover(parser, &mut builder, None, parse_struct_item),
        }
    }

    builder.token(parser.expect(TokenKind::CloseCurly)?);
    Ok(builder.finish())
}

fn parse_struct_item(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    if parser.current_token_kind() == TokenKind::At {
        return parse_annotation(parser);
    }

    match scan_name_list(parser, 0) {
        Some(names) if names.colon == TokenKind::Colon => parse_struct_member(parser),
        _ => parse_stmt(parser),
    }
}

fn parse_struct_member(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::StructMember);

    loop {
        builder.field(Field::Name, parse_identifier(parser)?);
        if !parser.eat(TokenKind::Comma, &mut builder) {
            break;
        }
    }

    builder.token(parser.expect(TokenKind::Colon)?);

    if parser.current_token_kind() != TokenKind::Assignment && can_start_type(parser) {
        builder.field(Field::Type, parse_type(parser)?);
    }

    if parser.current_token_kind() == TokenKind::Assignment {
        builder.token(parser.advance());
        builder.field(Field::Default, parse_expr(parser, BindingPower::Default)?);
    }

    parse_trailing_directives(parser, &mut builder)?;

    if parser.current_token_kind() == TokenKind::At && parser.on_same_line() {
        builder.node(parse_annotation(parser)?);
    }

    parser.eat(TokenKind::Semicolon, &mut builder);
    Ok(builder.finish())
}

fn parse_enum_decl(parser: &mut Parser, annotations: Vec<SyntaxNode>) -> Result<SyntaxNode, Error> {
    let mut builder = begin(NodeKind::EnumDeclaration, annotations);
    builder.field(Field::Name, parse_identifier(parser)?);
    builder.token(parser.expect(TokenKind::ColonColon)?);

    // enum or enum_flags
    builder.token(parser.advance());

    let has_base_type = !matches!(
        parser.current_token_kind(),
        TokenKind::OpenCurly | TokenKind::Directive(_)
    ) && can_start_type(parser);

    if has_base_type {
        builder.field(Field::BaseType, parse_type(parser)?);
    }

    parse_trailing_directives(parser, &mut builder)?;
    builder.field(Field::Body, parse_enum_body(parser)?);

    Ok(builder.finish())
}

fn parse_enum_body(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::EnumBody);
    builder.token(parser.expect(TokenKind::OpenCurly)?);

    loop {
        match parser.current_token_kind() {
            TokenKind::CloseCurly | TokenKind::EOF => break,
            TokenKind::Semicolon => {
                builder.token(parser.advance());
            }
            TokenKind::Identifier => {
                parse_or_recover(parser, &mut builder, None, parse_enum_member)
            }
            _ => parse_or_recover(parser, &mut builder, None, parse_stmt),
        }
    }

    builder.token(parser.expect(TokenKind::CloseCurly)?);
    Ok(builder.finish())
}

fn parse_enum_member(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::EnumMember);
    builder.field(Field::Name, parse_identifier(parser)?);

    if matches!(
        parser.current_token_kind(),
        TokenKind::Assignment | TokenKind::ColonColon
    ) {
        builder.token(parser.advance());
        builder.field(Field::Value, parse_expr(parser, BindingPower::Default)?);
    }

    parser.eat(TokenKind::Semicolon, &mut builder);
    Ok(builder.finish())
}

/// Procedures, operator overloads, `#type` signatures and baked procedures.
fn parse_function_decl(
    parser: &mut Parser,
    annotations: Vec<SyntaxNode>,
) -> Result<SyntaxNode, Error> {
    let mut builder = begin(NodeKind::FunctionDeclaration, annotations);

    if parser.at_keyword(Keyword::Operator) && parser.peek_kind(1).is_overloadable() {
        builder.token(parser.advance());
        parse_operator_name(parser, &mut builder)?;
    } else {
        builder.field(Field::Name, parse_identifier(parser)?);
    }

    builder.token(parser.expect(TokenKind::ColonColon)?);

    if let Some(directive) = parser.current_token().directive() {
        if directive.is_bake() {
            builder.token(parser.advance());
            builder.node(parse_identifier(parser)?);
            builder.field(Field::Arguments, parse_argument_list(parser)?);
            parser.eat(TokenKind::Semicolon, &mut builder);
            return Ok(builder.finish());
        }

        if directive == Directive::Type {
            builder.token(parser.advance());
        }
    }

    if matches!(
        parser.current_token().keyword(),
        Some(Keyword::Inline | Keyword::NoInline)
    ) && consult(parser, Conflict::DirectiveProcedureTypeFunctionDeclaration)?
        == Winner::ProcedureType
    {
        builder.token(parser.advance());
    }

    parse_signature(parser, &mut builder)?;

    // Procedure suffixes may sit on their own lines, anything else must
    // share the signature's line.
    while consult(parser, Conflict::DirectiveFunctionDeclaration)? == Winner::FunctionDeclaration {
        builder.node(parse_directive_expr(parser)?);
    }

    match consult(parser, Conflict::FunctionDeclaration)? {
        Winner::Block => {
            builder.field(Field::Body, parse_block_stmt(parser)?);
        }
        _ => {
            if consult(parser, Conflict::ProcedureTypeFunctionDeclaration)?
                == Winner::FunctionDeclaration
            {
                builder.token(parser.advance());
            }
        }
    }

    Ok(builder.finish())
}

/// The operator after `operator`: one token, or `[]` and `[]=`.
fn parse_operator_name(parser: &mut Parser, builder: &mut NodeBuilder) -> Result<(), Error> {
    let first = parser.advance();
    let is_subscript = first.kind == TokenKind::OpenBracket;
    builder.field_token(Field::Op, first);

    if is_subscript {
        builder.field_token(Field::Op, parser.expect(TokenKind::CloseBracket)?);
        if parser.current_token_kind() == TokenKind::Assignment {
            builder.field_token(Field::Op, parser.advance());
        }
    }

    Ok(())
}

/// `libc :: #foreign_library "libc";`
fn parse_foreign_library(
    parser: &mut Parser,
    annotations: Vec<SyntaxNode>,
) -> Result<SyntaxNode, Error> {
    let mut builder = begin(NodeKind::ForeignLibraryStatement, annotations);
    builder.field(Field::Name, parse_identifier(parser)?);
    builder.token(parser.expect(TokenKind::ColonColon)?);
    builder.token(parser.advance());
    builder.field(Field::Path, parse_string(parser)?);
    parser.eat(TokenKind::Semicolon, &mut builder);

    Ok(builder.finish())
}

/// `#import "Basic";`, `Math :: #import "Math"(FAST = true);`
fn parse_import(
    parser: &mut Parser,
    annotations: Vec<SyntaxNode>,
    namespaced: bool,
) -> Result<SyntaxNode, Error> {
    let mut builder = begin(NodeKind::ImportStatement, annotations);

    if namespaced {
        builder.field(Field::Namespace, parse_identifier(parser)?);
        builder.token(parser.expect(TokenKind::ColonColon)?);
    }

    builder.token(parser.advance());
    builder.field(Field::Path, parse_string(parser)?);

    if parser.current_token_kind() == TokenKind::OpenParen && parser.on_same_line() {
        builder.field(Field::Arguments, parse_argument_list(parser)?);
    }

    parser.eat(TokenKind::Semicolon, &mut builder);
    Ok(builder.finish())
}

fn parse_load_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::LoadStatement);
    builder.token(parser.advance());
    builder.field(Field::Path, parse_string(parser)?);
    parser.eat(TokenKind::Semicolon, &mut builder);

    Ok(builder.finish())
}

fn parse_asm_block(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::AsmBlock);
    builder.token(parser.advance());

    while parser.current_token_kind() == TokenKind::Identifier {
        builder.field(Field::Features, parse_identifier(parser)?);
        if !parser.eat(TokenKind::Comma, &mut builder) {
            break;
        }
    }

    builder.token(parser.expect(TokenKind::OpenCurly)?);
    if parser.current_token_kind() == TokenKind::AsmContent {
        builder.token(parser.advance());
    }
    builder.token(parser.expect(TokenKind::CloseCurly)?);

    Ok(builder.finish())
}

fn parse_scope_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::DirectiveStatement);
    builder.node(leaf_node(NodeKind::ScopeDirective, parser.advance()));

    Ok(builder.finish())
}

/// `#if COND { } else { }`, including the `#if x == { case ...; }` form.
fn parse_compile_time_if(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::DirectiveStatement);
    builder.token(parser.advance());

    parse_conditional(parser, builder)
}

fn parse_directive_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::DirectiveStatement);
    builder.node(parse_directive_expr(parser)?);
    parser.eat(TokenKind::Semicolon, &mut builder);

    Ok(builder.finish())
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::IfStatement);
    builder.token(parser.advance());

    parse_conditional(parser, builder)
}

/// Shared by `if` and `#if`: condition, `then`, consequence and `else`.
/// An `else if` chain is read arm by arm and folded back together from the
/// innermost arm, so long chains do not nest calls.
fn parse_conditional(parser: &mut Parser, mut builder: NodeBuilder) -> Result<SyntaxNode, Error> {
    let mut enclosing = Vec::new();

    let mut node = loop {
        let previous = parser.switch_condition;
        parser.switch_condition = true;
        let condition = parse_expr(parser, BindingPower::Default);
        parser.switch_condition = previous;
        builder.field(Field::Condition, condition?);

        if parser.current_token_kind() == TokenKind::Equals
            && parser.peek_kind(1) == TokenKind::OpenCurly
        {
            builder.field_token(Field::Operator, parser.advance());
            builder.field(Field::Consequence, parse_block_stmt(parser)?);
            break builder.finish();
        }

        if parser.at_keyword(Keyword::Then) {
            builder.token(parser.advance());
        }

        builder.field(Field::Consequence, parse_body(parser, Conflict::StatementIf)?);

        if !parser.at_keyword(Keyword::Else) {
            break builder.finish();
        }
        builder.token(parser.advance());

        let else_if = consult(parser, Conflict::StatementIf)? == Winner::Statement
            && parser.at_keyword(Keyword::If)
            && !keyword_acts_as_name(parser, 0);

        if !else_if {
            builder.field(Field::Alternative, parse_body(parser, Conflict::StatementIf)?);
            break builder.finish();
        }

        enclosing.push(builder);
        builder = NodeBuilder::new(NodeKind::IfStatement);
        builder.token(parser.advance());
    };

    while let Some(mut parent) = enclosing.pop() {
        parent.field(Field::Alternative, node);
        node = parent.finish();
    }

    Ok(node)
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::WhileStatement);
    builder.token(parser.advance());
    builder.field(Field::Condition, parse_expr(parser, BindingPower::Default)?);
    builder.field(Field::Body, parse_body(parser, Conflict::StatementWhile)?);

    Ok(builder.finish())
}

/// `for x: list`, `for i, j: 0..n`, `for *< list` and `for 0..9`.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::ForStatement);
    builder.token(parser.advance());

    loop {
        let conflict = match parser.current_token_kind() {
            TokenKind::Star => Conflict::ForArrayAccessUnary,
            TokenKind::Less => Conflict::ForBinary,
            _ => break,
        };
        if consult(parser, conflict)? != Winner::ForMarker {
            break;
        }
        builder.token(parser.advance());
    }

    if for_has_iterator(parser)? {
        loop {
            builder.field(Field::Iterator, parse_identifier(parser)?);
            if !parser.eat(TokenKind::Comma, &mut builder) {
                break;
            }
        }
        builder.token(parser.expect(TokenKind::Colon)?);
    }

    builder.field(Field::Range, parse_range_expr(parser)?);
    builder.field(Field::Body, parse_body(parser, Conflict::StatementFor)?);

    Ok(builder.finish())
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::ReturnStatement);
    builder.token(parser.advance());

    if parser.on_same_line() && can_start_expression(parser) {
        loop {
            builder.field(Field::Values, parse_expr(parser, BindingPower::Default)?);
            if !parser.eat(TokenKind::Comma, &mut builder) {
                break;
            }
        }
    }

    parser.eat(TokenKind::Semicolon, &mut builder);
    Ok(builder.finish())
}

/// `break` and `continue`, with an optional loop label.
pub fn parse_break_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let kind = match parser.current_token().keyword() {
        Some(Keyword::Continue) => NodeKind::ContinueStatement,
        _ => NodeKind::BreakStatement,
    };

    let mut builder = NodeBuilder::new(kind);
    builder.token(parser.advance());

    if parser.current_token_kind() == TokenKind::Identifier && parser.on_same_line() {
        builder.node(parse_identifier(parser)?);
    }

    parser.eat(TokenKind::Semicolon, &mut builder);
    Ok(builder.finish())
}

pub fn parse_defer_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::DeferStatement);
    builder.token(parser.advance());
    builder.field(Field::Statement, parse_body(parser, Conflict::StatementDefer)?);

    Ok(builder.finish())
}

pub fn parse_remove_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::RemoveStatement);
    builder.token(parser.advance());
    builder.field(Field::Expression, parse_expr(parser, BindingPower::Default)?);
    parser.eat(TokenKind::Semicolon, &mut builder);

    Ok(builder.finish())
}

/// `using x;`, `using e: Entity;` and `using,only(a, b) M;`
pub fn parse_using_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::UsingStatement);
    builder.token(parser.advance());

    if parser.current_token_kind() == TokenKind::Comma
        && matches!(
            parser.peek_keyword(1),
            Some(Keyword::Map | Keyword::Except | Keyword::Only)
        )
    {
        builder.token(parser.advance());
        builder.token(parser.advance());

        if parser.current_token_kind() == TokenKind::OpenParen {
            builder.node(parse_argument_list(parser)?);
        }
    }

    if consult(parser, Conflict::DeclarationExpression)? == Winner::Declaration {
        let shape = declaration_shape(parser)?;
        builder.field(Field::Statement, parse_declaration(parser, shape, Vec::new())?);
        return Ok(builder.finish());
    }

    builder.field(Field::Expression, parse_expr(parser, BindingPower::Default)?);
    parser.eat(TokenKind::Semicolon, &mut builder);

    Ok(builder.finish())
}

/// `case VALUE;` followed by its statements, up to the next `case` or `}`.
pub fn parse_case_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::CaseStatement);
    builder.token(parser.advance());

    if parser.current_token_kind() != TokenKind::Semicolon {
        builder.field(Field::Value, parse_range_expr(parser)?);
    }
    builder.token(parser.expect(TokenKind::Semicolon)?);

    parse_statement_list(parser, &mut builder, ListEnd::NextCase);
    Ok(builder.finish())
}

/// Assignments and expression statements:
/// `a, b = b, a;`, `x += 1;`, `print("hi");`
fn parse_expression_list_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut targets = vec![parse_expr(parser, BindingPower::Default)?];
    let mut commas = Vec::new();

    while parser.current_token_kind() == TokenKind::Comma {
        commas.push(parser.advance());
        targets.push(parse_expr(parser, BindingPower::Default)?);
    }

    if parser.current_token_kind().is_assignment_operator() {
        let mut builder = NodeBuilder::new(NodeKind::Assignment);
        let mut commas = commas.into_iter();

        for (index, target) in targets.into_iter().enumerate() {
            if index > 0 {
                if let Some(comma) = commas.next() {
                    builder.token(comma);
                }
            }
            builder.field(Field::Left, target);
        }

        builder.field_token(Field::Operator, parser.advance());

        loop {
            builder.field(Field::Right, parse_expr(parser, BindingPower::Default)?);
            if !parser.eat(TokenKind::Comma, &mut builder) {
                break;
            }
        }

        parser.eat(TokenKind::Semicolon, &mut builder);
        return Ok(builder.finish());
    }

    if targets.len() > 1 {
        return Err(Error::new(
            ErrorImpl::ExpectedToken {
                expected: String::from("="),
                found: parser.describe_current(),
            },
            parser.get_position(),
        ));
    }

    let mut builder = NodeBuilder::new(NodeKind::ExpressionStatement);
    for target in targets {
        builder.node(target);
    }
    parser.eat(TokenKind::Semicolon, &mut builder);

    Ok(builder.finish())
}

