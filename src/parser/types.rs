use crate::{
    cst::{
        cst::{leaf_node, NodeBuilder, SyntaxNode},
        kinds::{Field, NodeKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        directives::{Directive, DirectiveOperand},
        tokens::{Keyword, TokenKind},
    },
};

use super::{
    expr::{
        parse_call_expr, parse_directive_expr, parse_expr, parse_identifier, parse_member_expr,
        parse_range_expr,
    },
    lookups::{BindingPower, Lookups, LOOKUPS},
    parser::Parser,
    resolver::{consult, Conflict, Peek, Winner},
};

pub fn create_token_type_lookups(lookups: &mut Lookups) {
    lookups.type_nud(TokenKind::Star, parse_pointer_type);
    lookups.type_nud(TokenKind::OpenBracket, parse_array_type);
    lookups.type_nud(TokenKind::OpenParen, parse_procedure_type);
    lookups.type_nud(TokenKind::Dollar, parse_polymorphic_type);

    for directive in Directive::ALL {
        if directive.is_expression() && directive.operand() != DirectiveOperand::HereString {
            lookups.type_nud(TokenKind::Directive(directive), parse_directive_expr);
        }
    }
}

/// True when the current token can begin a type.
pub fn can_start_type(peek: &impl Peek) -> bool {
    let token = peek.token_at(0);

    match token.kind {
        TokenKind::Identifier => !matches!(
            token.keyword(),
            Some(Keyword::Then | Keyword::Else | Keyword::Case)
        ),
        kind => LOOKUPS.type_nud_lookup.contains_key(&kind),
    }
}

pub fn parse_type(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    parser.enter()?;
    let result = parse_type_inner(parser);
    parser.leave();
    result
}

fn parse_type_inner(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let kind = parser.current_token_kind();

    if kind == TokenKind::Identifier {
        if consult(parser, Conflict::TypeIdentifier)? == Winner::PrimitiveType {
            return Ok(leaf_node(NodeKind::PrimitiveType, parser.advance()));
        }

        if matches!(
            parser.current_token().keyword(),
            Some(Keyword::Inline | Keyword::NoInline)
        ) && consult(parser, Conflict::DirectiveProcedureTypeFunctionDeclaration)?
            == Winner::ProcedureType
        {
            return parse_procedure_type(parser);
        }

        return parse_named_type(parser);
    }

    match LOOKUPS.type_nud_lookup.get(&kind) {
        Some(handler) => handler(parser),
        None => Err(Error::new(
            ErrorImpl::ExpectedType {
                found: parser.describe_current(),
            },
            parser.get_position(),
        )),
    }
}

/// `Foo`, `Module.Foo` or a parameterised `Table(K, V)`. Stops before
/// `.{`/`.[` so a literal after the type wraps the whole type.
fn parse_named_type(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut node = parse_identifier(parser)?;

    loop {
        match parser.current_token_kind() {
            TokenKind::Dot if parser.peek_kind(1) == TokenKind::Identifier => {
                node = parse_member_expr(parser, node, BindingPower::Member)?;
            }
            TokenKind::OpenParen => match consult(parser, Conflict::CallMember)? {
                Winner::FunctionCall => {
                    node = parse_call_expr(parser, node, BindingPower::Call)?;
                }
                _ => break,
            },
            _ => break,
        }
    }

    Ok(node)
}

pub fn parse_pointer_type(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::PointerType);
    while consult(parser, Conflict::PointerType)? == Winner::PointerType {
        builder.token(parser.advance());
    }
    builder.field(Field::Pointee, parse_type(parser)?);

    Ok(builder.finish())
}

/// `[] T`, `[..] T`, `[N] T` and `[A..B] T`.
pub fn parse_array_type(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::ArrayType);
    builder.token(parser.expect(TokenKind::OpenBracket)?);

    match parser.current_token_kind() {
        TokenKind::CloseBracket => {}
        TokenKind::DotDot if parser.peek_kind(1) == TokenKind::CloseBracket => {
            builder.token(parser.advance());
        }
        _ => {
            builder.field(Field::Size, parse_range_expr(parser)?);
        }
    }

    builder.token(parser.expect(TokenKind::CloseBracket)?);
    builder.field(Field::Element, parse_type(parser)?);

    Ok(builder.finish())
}

pub fn parse_polymorphic_type(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::PolymorphicType);
    builder.token(parser.expect(TokenKind::Dollar)?);
    builder.node(parse_identifier(parser)?);

    Ok(builder.finish())
}

pub fn parse_procedure_type(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::ProcedureType);

    if matches!(
        parser.current_token().keyword(),
        Some(Keyword::Inline | Keyword::NoInline)
    ) {
        builder.token(parser.advance());
    }

    parse_signature(parser, &mut builder)?;

    // Suffixes only attach on the signature's own line
    while consult(parser, Conflict::ProcedureType)? == Winner::ProcedureType
        && consult(parser, Conflict::DirectiveProcedureType)? == Winner::ProcedureType
    {
        builder.node(parse_directive_expr(parser)?);
    }

    Ok(builder.finish())
}

/// `( parameters ) -> returns`
pub fn parse_signature(parser: &mut Parser, builder: &mut NodeBuilder) -> Result<(), Error> {
    parse_parameters(parser, builder)?;

    if parser.current_token_kind() == TokenKind::Arrow {
        builder.token(parser.advance());
        builder.field(Field::ReturnType, parse_return_type_list(parser)?);
    }

    Ok(())
}

/// `( parameter_list? )`
pub fn parse_parameters(parser: &mut Parser, builder: &mut NodeBuilder) -> Result<(), Error> {
    builder.token(parser.expect(TokenKind::OpenParen)?);

    if parser.current_token_kind() != TokenKind::CloseParen {
        builder.field(Field::Parameters, parse_parameter_list(parser)?);
    }

    builder.token(parser.expect(TokenKind::CloseParen)?);
    Ok(())
}

pub fn parse_parameter_list(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let previous = parser.switch_condition;
    parser.switch_condition = false;
    parser.parameter_depth += 1;

    let result = parse_parameter_list_inner(parser);

    parser.parameter_depth -= 1;
    parser.switch_condition = previous;
    result
}

fn parse_parameter_list_inner(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::ParameterList);

    loop {
        builder.node(parse_parameter(parser)?);

        if !parser.eat(TokenKind::Comma, &mut builder) {
            break;
        }
        if parser.current_token_kind() == TokenKind::CloseParen {
            break;
        }
    }

    Ok(builder.finish())
}

fn parse_parameter(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::ParameterDeclaration);

    if parser.at_keyword(Keyword::Using)
        && consult(parser, Conflict::ParameterDeclaration)? == Winner::ParameterDeclaration
    {
        builder.token(parser.advance());
    }

    match consult(parser, Conflict::TypeParameterExpression)? {
        Winner::PolymorphicType => {
            builder.token(parser.advance());
            builder.field(Field::Polymorphic, parse_identifier(parser)?);
        }
        Winner::ParameterDeclaration => {
            builder.field(Field::Name, parse_identifier(parser)?);
        }
        _ => {
            // Unnamed parameter, only a type
            builder.field(Field::Type, parse_type(parser)?);
            return Ok(builder.finish());
        }
    }

    if parser.current_token_kind() == TokenKind::Colon {
        builder.token(parser.advance());

        if parser.current_token_kind() == TokenKind::DotDot {
            builder.token(parser.advance());
        }

        if parser.current_token_kind() != TokenKind::Assignment && can_start_type(parser) {
            builder.field(Field::Type, parse_type(parser)?);
        }
    }

    if consult(parser, Conflict::ParameterExpression)? == Winner::DefaultValue {
        builder.token(parser.advance());
        builder.field(Field::Default, parse_expr(parser, BindingPower::Default)?);
    }

    Ok(builder.finish())
}

/// Return types after `->`. A bare comma-separated list is only allowed
/// outside parameter lists, inside one the list must be parenthesised.
pub fn parse_return_type_list(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::ReturnTypeList);

    let parenthesised = parser.current_token_kind() == TokenKind::OpenParen
        && parser.peek_kind(1) == TokenKind::Identifier
        && parser.peek_kind(2) == TokenKind::Colon;

    if parenthesised {
        builder.token(parser.advance());
        loop {
            builder.node(parse_return_type(parser)?);
            if !parser.eat(TokenKind::Comma, &mut builder) {
                break;
            }
        }
        builder.token(parser.expect(TokenKind::CloseParen)?);
        return Ok(builder.finish());
    }

    loop {
        builder.node(parse_return_type(parser)?);

        if parser.current_token_kind() != TokenKind::Comma
            || consult(parser, Conflict::ReturnTypeList)? == Winner::ParameterList
        {
            break;
        }
        builder.token(parser.advance());
    }

    Ok(builder.finish())
}

fn parse_return_type(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::ReturnType);

    if consult(parser, Conflict::TypeReturnType)? == Winner::ReturnType {
        builder.field(Field::Name, parse_identifier(parser)?);
        builder.token(parser.advance());
    }

    builder.field(Field::Type, parse_type(parser)?);

    if parser.current_token_kind() == TokenKind::Directive(Directive::Must) && parser.on_same_line()
    {
        builder.token(parser.advance());
    }

    Ok(builder.finish())
}
