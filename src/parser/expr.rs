use crate::{
    cst::{
        cst::{leaf_node, lexical_error_node, NodeBuilder, SyntaxNode},
        kinds::{Field, NodeKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        directives::{Directive, DirectiveOperand},
        tokens::{Keyword, TokenKind},
    },
};

use super::{
    lookups::{BindingPower, LOOKUPS},
    parser::Parser,
    resolver::{consult, prefix_keyword_is_name, Conflict, Winner},
    stmt::parse_block_stmt,
    types::{parse_parameters, parse_procedure_type, parse_type},
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<SyntaxNode, Error> {
    parser.enter()?;
    let result = parse_expr_inner(parser, bp);
    parser.leave();
    result
}

fn parse_expr_inner(parser: &mut Parser, bp: BindingPower) -> Result<SyntaxNode, Error> {
    let mut left = parse_nud(parser)?;

    // While the next token binds tighter than `bp`, it extends `left`
    loop {
        let kind = parser.current_token_kind();
        let Some(next_bp) = LOOKUPS.binding_power_lookup.get(&kind).copied() else {
            break;
        };

        if next_bp <= bp {
            break;
        }

        // `if x == { case ...; }` keeps `==` for the switch
        if parser.switch_condition
            && kind == TokenKind::Equals
            && parser.peek_kind(1) == TokenKind::OpenCurly
        {
            break;
        }

        let Some(led) = LOOKUPS.led_lookup.get(&kind) else {
            break;
        };
        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

fn parse_nud(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let token = parser.current_token();

    if let Some(keyword) = token.keyword() {
        if let Some(handler) = LOOKUPS.keyword_nud_lookup.get(&keyword) {
            let is_name = matches!(
                keyword,
                Keyword::Cast | Keyword::Xx | Keyword::Inline | Keyword::NoInline
            ) && prefix_keyword_is_name(parser);

            if !is_name {
                return handler(parser);
            }
        }
    }

    match LOOKUPS.nud_lookup.get(&token.kind) {
        Some(handler) => handler(parser),
        None if token.directive().is_some() => Err(Error::new(
            ErrorImpl::MisplacedDirective {
                directive: token.value.clone(),
            },
            parser.get_position(),
        )),
        None => Err(Error::new(
            ErrorImpl::ExpectedExpression {
                found: parser.describe_current(),
            },
            parser.get_position(),
        )),
    }
}

/// True when the current token can begin an expression.
pub fn can_start_expression(parser: &Parser) -> bool {
    let token = parser.current_token();

    match token.kind {
        TokenKind::Identifier => !matches!(
            token.keyword(),
            Some(Keyword::Then | Keyword::Else | Keyword::Case)
        ),
        TokenKind::Directive(directive) => directive.is_expression(),
        kind => LOOKUPS.nud_lookup.contains_key(&kind),
    }
}

/// Expression that may be a `start..end` range. Only for-loop ranges,
/// indices, array sizes and case values go through here.
pub fn parse_range_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let start = parse_expr(parser, BindingPower::Default)?;

    let is_range = match start.kind() {
        NodeKind::DirectiveExpression => {
            consult(parser, Conflict::DirectiveRange)? == Winner::RangeExpression
        }
        NodeKind::CastExpression => {
            consult(parser, Conflict::CastRange)? == Winner::RangeExpression
        }
        _ => parser.current_token_kind() == TokenKind::DotDot,
    };

    if !is_range {
        return Ok(start);
    }

    let mut builder = NodeBuilder::new(NodeKind::RangeExpression);
    builder.field(Field::Start, start);
    builder.token(parser.advance());
    builder.field(Field::End, parse_expr(parser, BindingPower::Default)?);

    Ok(builder.finish())
}

pub fn parse_identifier(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(leaf_node(NodeKind::Identifier, token))
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    match parser.current_token_kind() {
        TokenKind::Identifier => Ok(leaf_node(NodeKind::Identifier, parser.advance())),
        TokenKind::Number => Ok(leaf_node(NodeKind::NumberLiteral, parser.advance())),
        TokenKind::Uninitialized => Ok(leaf_node(NodeKind::UninitializedLiteral, parser.advance())),
        _ => Err(Error::new(
            ErrorImpl::ExpectedExpression {
                found: parser.describe_current(),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_keyword_literal(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let kind = match parser.current_token().keyword() {
        Some(Keyword::True | Keyword::False) => NodeKind::BooleanLiteral,
        _ => NodeKind::NullLiteral,
    };

    Ok(leaf_node(kind, parser.advance()))
}

pub fn parse_lexical_error(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    Ok(lexical_error_node(parser.advance()))
}

pub fn parse_string_literal(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::StringLiteral);
    builder.token(parser.expect(TokenKind::DoubleQuote)?);

    loop {
        match parser.current_token_kind() {
            TokenKind::StringContent => {
                builder.token(parser.advance());
            }
            TokenKind::EscapeSequence => {
                builder.node(leaf_node(NodeKind::EscapeSequence, parser.advance()));
            }
            TokenKind::StringPlaceholder => {
                builder.node(leaf_node(NodeKind::StringPlaceholder, parser.advance()));
            }
            _ => break,
        }
    }

    builder.token(parser.expect(TokenKind::DoubleQuote)?);
    Ok(builder.finish())
}

pub fn parse_here_string(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::StringLiteral);
    builder.token(parser.expect(TokenKind::Directive(Directive::String))?);
    builder.field(Field::Delimiter, parse_identifier(parser)?);

    if parser.current_token_kind() == TokenKind::HereStringContent {
        builder.field_token(Field::Content, parser.advance());
    }

    builder.field(Field::EndDelimiter, parse_identifier(parser)?);
    Ok(builder.finish())
}

/// Quoted string or here-string.
pub fn parse_string(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    match parser.current_token_kind() {
        TokenKind::DoubleQuote => parse_string_literal(parser),
        TokenKind::Directive(Directive::String) => parse_here_string(parser),
        TokenKind::Error => parse_lexical_error(parser),
        _ => Err(Error::new(
            ErrorImpl::ExpectedToken {
                expected: String::from("string literal"),
                found: parser.describe_current(),
            },
            parser.get_position(),
        )),
    }
}

fn at_string(parser: &Parser) -> bool {
    matches!(
        parser.current_token_kind(),
        TokenKind::DoubleQuote | TokenKind::Directive(Directive::String)
    )
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: SyntaxNode,
    bp: BindingPower,
) -> Result<SyntaxNode, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    let mut builder = NodeBuilder::new(NodeKind::BinaryExpression);
    builder
        .field(Field::Left, left)
        .field_token(Field::Operator, operator_token)
        .field(Field::Right, right);

    Ok(builder.finish())
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let operator_token = parser.advance();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    let mut builder = NodeBuilder::new(NodeKind::UnaryExpression);
    builder
        .field_token(Field::Operator, operator_token)
        .field(Field::Operand, operand);

    Ok(builder.finish())
}

/// `cast(T) e`, `cast,trunc,no_check(T) e` and `xx e`.
pub fn parse_cast_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::CastExpression);
    let keyword = parser.advance();
    let is_cast = keyword.keyword() == Some(Keyword::Cast);
    builder.token(keyword);

    if is_cast {
        while parser.current_token_kind() == TokenKind::Comma
            && matches!(parser.peek_keyword(1), Some(Keyword::Trunc | Keyword::NoCheck))
        {
            builder.token(parser.advance());
            builder.token(parser.advance());
        }

        builder.token(parser.expect(TokenKind::OpenParen)?);
        builder.field(Field::Type, parse_type(parser)?);
        builder.token(parser.expect(TokenKind::CloseParen)?);
    }

    builder.field(Field::Value, parse_expr(parser, BindingPower::Unary)?);

    Ok(builder.finish())
}

/// `inline`/`no_inline` before a signature is a procedure type, before
/// anything else it is a directive expression around a call.
pub fn parse_inline_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    if consult(parser, Conflict::DirectiveProcedureTypeFunctionDeclaration)?
        == Winner::ProcedureType
    {
        return parse_procedure_type(parser);
    }

    let mut builder = NodeBuilder::new(NodeKind::DirectiveExpression);
    builder.token(parser.advance());
    builder.node(parse_expr(parser, BindingPower::Unary)?);

    Ok(builder.finish())
}

/// `ifx cond then a else b` in expression position.
pub fn parse_ifx_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::IfStatement);
    builder.token(parser.advance());
    builder.field(Field::Condition, parse_expr(parser, BindingPower::Default)?);

    if parser.at_keyword(Keyword::Then) {
        builder.token(parser.advance());
    }

    builder.field(Field::Consequence, parse_expr(parser, BindingPower::Default)?);

    if parser.at_keyword(Keyword::Else) {
        builder.token(parser.advance());
        builder.field(Field::Alternative, parse_expr(parser, BindingPower::Default)?);
    }

    Ok(builder.finish())
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    if consult(parser, Conflict::TypeExpression)? == Winner::TypeExpression {
        return parse_procedure_type(parser);
    }

    let mut builder = NodeBuilder::new(NodeKind::ParenthesizedExpression);
    builder.token(parser.expect(TokenKind::OpenParen)?);

    let previous = parser.switch_condition;
    parser.switch_condition = false;
    let inner = parse_expr(parser, BindingPower::Default);
    parser.switch_condition = previous;

    builder.node(inner?);
    builder.token(parser.expect(TokenKind::CloseParen)?);

    Ok(builder.finish())
}

/// Array and polymorphic types written where an expression is expected,
/// e.g. `[4] int.[1, 2, 3, 4]` or `$T`.
pub fn parse_type_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    match consult(parser, Conflict::TypeExpression)? {
        Winner::TypeExpression => parse_type(parser),
        _ => Err(Error::new(
            ErrorImpl::ExpectedExpression {
                found: parser.describe_current(),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: SyntaxNode,
    _bp: BindingPower,
) -> Result<SyntaxNode, Error> {
    match consult(parser, Conflict::ExpressionCompositeLiteral)? {
        winner @ (Winner::CompositeLiteral | Winner::ArrayLiteral) => {
            parse_literal_body(parser, winner, Some(left))
        }
        _ => {
            let mut builder = NodeBuilder::new(NodeKind::MemberAccess);
            builder.field(Field::Object, left);
            builder.token(parser.expect(TokenKind::Dot)?);
            builder.field(Field::Member, parse_identifier(parser)?);
            Ok(builder.finish())
        }
    }
}

/// `.{ ... }`, `.[ ... ]` or `.NAME` with no object in front.
pub fn parse_leading_dot_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    match consult(parser, Conflict::ExpressionCompositeLiteral)? {
        winner @ (Winner::CompositeLiteral | Winner::ArrayLiteral) => {
            parse_literal_body(parser, winner, None)
        }
        _ => {
            let mut builder = NodeBuilder::new(NodeKind::MemberAccess);
            builder.token(parser.expect(TokenKind::Dot)?);
            builder.field(Field::Member, parse_identifier(parser)?);
            Ok(builder.finish())
        }
    }
}

/// Parses from the `.` of `T.{ ... }` or `T.[ ... ]`.
fn parse_literal_body(
    parser: &mut Parser,
    winner: Winner,
    ty: Option<SyntaxNode>,
) -> Result<SyntaxNode, Error> {
    let is_composite = winner == Winner::CompositeLiteral;
    let kind = if is_composite {
        NodeKind::CompositeLiteral
    } else {
        NodeKind::ArrayLiteral
    };

    let mut builder = NodeBuilder::new(kind);
    if let Some(ty) = ty {
        builder.field(Field::Type, ty);
    }
    builder.token(parser.expect(TokenKind::Dot)?);

    let (open, close) = if is_composite {
        (TokenKind::OpenCurly, TokenKind::CloseCurly)
    } else {
        (TokenKind::OpenBracket, TokenKind::CloseBracket)
    };
    builder.token(parser.expect(open)?);

    let previous = parser.switch_condition;
    parser.switch_condition = false;
    let elements = parse_literal_elements(parser, &mut builder, close, is_composite);
    parser.switch_condition = previous;
    elements?;

    builder.token(parser.expect(close)?);
    Ok(builder.finish())
}

fn parse_literal_elements(
    parser: &mut Parser,
    builder: &mut NodeBuilder,
    close: TokenKind,
    is_composite: bool,
) -> Result<(), Error> {
    while parser.current_token_kind() != close {
        let element = if is_composite {
            parse_composite_element(parser)?
        } else {
            parse_expr(parser, BindingPower::Default)?
        };
        builder.node(element);

        if !parser.eat(TokenKind::Comma, builder) {
            break;
        }
    }

    Ok(())
}

fn parse_composite_element(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::CompositeElement);

    let named = parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_kind(1) == TokenKind::Assignment;
    let dotted = parser.current_token_kind() == TokenKind::Dot
        && parser.peek_kind(1) == TokenKind::Identifier
        && parser.peek_kind(2) == TokenKind::Assignment;

    if named {
        builder.field(Field::Name, parse_identifier(parser)?);
        builder.token(parser.advance());
        builder.field(Field::Value, parse_expr(parser, BindingPower::Default)?);
    } else if dotted {
        builder.token(parser.advance());
        builder.field(Field::Member, parse_identifier(parser)?);
        builder.token(parser.advance());
        builder.field(Field::Value, parse_expr(parser, BindingPower::Default)?);
    } else {
        builder.node(parse_expr(parser, BindingPower::Default)?);
    }

    Ok(builder.finish())
}

pub fn parse_array_access_expr(
    parser: &mut Parser,
    left: SyntaxNode,
    _bp: BindingPower,
) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::ArrayAccess);
    builder.field(Field::Array, left);
    builder.token(parser.expect(TokenKind::OpenBracket)?);

    let previous = parser.switch_condition;
    parser.switch_condition = false;
    let index = parse_range_expr(parser);
    parser.switch_condition = previous;

    builder.field(Field::Index, index?);
    builder.token(parser.expect(TokenKind::CloseBracket)?);

    Ok(builder.finish())
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: SyntaxNode,
    _bp: BindingPower,
) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::FunctionCall);
    builder.field(Field::Function, left);
    builder.field(Field::Arguments, parse_argument_list(parser)?);

    Ok(builder.finish())
}

pub fn parse_argument_list(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::ArgumentList);
    builder.token(parser.expect(TokenKind::OpenParen)?);

    let previous = parser.switch_condition;
    parser.switch_condition = false;
    let arguments = parse_arguments(parser, &mut builder);
    parser.switch_condition = previous;
    arguments?;

    builder.token(parser.expect(TokenKind::CloseParen)?);
    Ok(builder.finish())
}

fn parse_arguments(parser: &mut Parser, builder: &mut NodeBuilder) -> Result<(), Error> {
    while parser.current_token_kind() != TokenKind::CloseParen {
        let mut argument = NodeBuilder::new(NodeKind::Argument);

        if parser.current_token_kind() == TokenKind::Identifier
            && parser.peek_kind(1) == TokenKind::Assignment
        {
            argument.field(Field::Name, parse_identifier(parser)?);
            argument.token(parser.advance());
            argument.field(Field::Value, parse_expr(parser, BindingPower::Default)?);
        } else {
            argument.node(parse_expr(parser, BindingPower::Default)?);
        }

        builder.node(argument.finish());

        if !parser.eat(TokenKind::Comma, builder) {
            break;
        }
    }

    Ok(())
}

/// `@name`, `@name "text"` or `@name(args)`.
pub fn parse_annotation(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let mut builder = NodeBuilder::new(NodeKind::Annotation);
    builder.token(parser.expect(TokenKind::At)?);
    builder.field(Field::Name, parse_identifier(parser)?);

    if !parser.on_same_line() {
        return Ok(builder.finish());
    }

    if at_string(parser) {
        builder.node(parse_string(parser)?);
    } else if parser.current_token_kind() == TokenKind::OpenParen {
        builder.token(parser.advance());
        while parser.current_token_kind() != TokenKind::CloseParen {
            builder.field(Field::Args, parse_expr(parser, BindingPower::Default)?);
            if !parser.eat(TokenKind::Comma, &mut builder) {
                break;
            }
        }
        builder.token(parser.expect(TokenKind::CloseParen)?);
    }

    Ok(builder.finish())
}

pub fn parse_directive_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let token = parser.current_token();
    let Some(directive) = token.directive() else {
        return Err(parser.unexpected());
    };

    let operand = directive.operand();
    match operand {
        DirectiveOperand::StatementOnly => {
            return Err(Error::new(
                ErrorImpl::MisplacedDirective {
                    directive: token.value.clone(),
                },
                parser.get_position(),
            ))
        }
        DirectiveOperand::HereString => return parse_here_string(parser),
        _ => {}
    }

    let mut builder = NodeBuilder::new(NodeKind::DirectiveExpression);
    builder.token(parser.advance());

    match operand {
        DirectiveOperand::Expression => {
            if parser.current_token_kind() == TokenKind::OpenCurly {
                builder.node(parse_block_stmt(parser)?);
            } else {
                builder.node(parse_expr(parser, BindingPower::Default)?);
            }
        }
        DirectiveOperand::OptionalExpression => {
            if parser.on_same_line() && can_start_expression(parser) {
                builder.node(parse_expr(parser, BindingPower::Default)?);
            }
        }
        DirectiveOperand::OptionalString => {
            if parser.on_same_line() && at_string(parser) {
                builder.node(parse_string(parser)?);
            }
        }
        DirectiveOperand::ForeignName => {
            if parser.on_same_line() && parser.current_token_kind() == TokenKind::Identifier {
                builder.node(parse_identifier(parser)?);
            }
            if parser.on_same_line() && at_string(parser) {
                builder.node(parse_string(parser)?);
            }
        }
        DirectiveOperand::Bake => {
            builder.node(parse_identifier(parser)?);
            builder.field(Field::Arguments, parse_argument_list(parser)?);
        }
        DirectiveOperand::OptionalType => {
            if consult(parser, Conflict::DirectiveType)? == Winner::TypeExpression {
                builder.node(parse_type(parser)?);
            }
        }
        DirectiveOperand::CodeBody => {
            if parser.current_token_kind() == TokenKind::OpenCurly {
                builder.node(parse_block_stmt(parser)?);
            } else if parser.on_same_line() && can_start_expression(parser) {
                builder.node(parse_expr(parser, BindingPower::Default)?);
            }
        }
        DirectiveOperand::ParameterList => {
            parse_parameters(parser, &mut builder)?;
        }
        DirectiveOperand::None
        | DirectiveOperand::StatementOnly
        | DirectiveOperand::HereString => {}
    }

    Ok(builder.finish())
}
