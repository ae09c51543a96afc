use std::fmt::Display;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum NodeKind {
    SourceFile,
    Error,

    // Statements
    ImportStatement,
    LoadStatement,
    ForeignLibraryStatement,
    AsmBlock,
    FunctionDeclaration,
    StructDeclaration,
    EnumDeclaration,
    Declaration,
    Assignment,
    IfStatement,
    WhileStatement,
    ForStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    DeferStatement,
    RemoveStatement,
    UsingStatement,
    Block,
    ExpressionStatement,
    DirectiveStatement,
    CaseStatement,
    ScopeDirective,

    // Declaration parts
    StructBody,
    StructMember,
    EnumBody,
    EnumMember,
    ParameterList,
    ParameterDeclaration,
    ReturnTypeList,
    ReturnType,
    ArgumentList,
    Argument,
    CompositeElement,

    // Expressions
    Identifier,
    NumberLiteral,
    StringLiteral,
    EscapeSequence,
    StringPlaceholder,
    BooleanLiteral,
    NullLiteral,
    UninitializedLiteral,
    FunctionCall,
    MemberAccess,
    ArrayAccess,
    CastExpression,
    UnaryExpression,
    BinaryExpression,
    ParenthesizedExpression,
    CompositeLiteral,
    ArrayLiteral,
    RangeExpression,
    DirectiveExpression,
    Annotation,

    // Types
    PointerType,
    ArrayType,
    ProcedureType,
    PrimitiveType,
    PolymorphicType,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::SourceFile => "source_file",
            NodeKind::Error => "ERROR",
            NodeKind::ImportStatement => "import_statement",
            NodeKind::LoadStatement => "load_statement",
            NodeKind::ForeignLibraryStatement => "foreign_library_statement",
            NodeKind::AsmBlock => "asm_block",
            NodeKind::FunctionDeclaration => "function_declaration",
            NodeKind::StructDeclaration => "struct_declaration",
            NodeKind::EnumDeclaration => "enum_declaration",
            NodeKind::Declaration => "declaration",
            NodeKind::Assignment => "assignment",
            NodeKind::IfStatement => "if_statement",
            NodeKind::WhileStatement => "while_statement",
            NodeKind::ForStatement => "for_statement",
            NodeKind::ReturnStatement => "return_statement",
            NodeKind::BreakStatement => "break_statement",
            NodeKind::ContinueStatement => "continue_statement",
            NodeKind::DeferStatement => "defer_statement",
            NodeKind::RemoveStatement => "remove_statement",
            NodeKind::UsingStatement => "using_statement",
            NodeKind::Block => "block",
            NodeKind::ExpressionStatement => "expression_statement",
            NodeKind::DirectiveStatement => "directive_statement",
            NodeKind::CaseStatement => "case_statement",
            NodeKind::ScopeDirective => "scope_directive",
            NodeKind::StructBody => "struct_body",
            NodeKind::StructMember => "struct_member",
            NodeKind::EnumBody => "enum_body",
            NodeKind::EnumMember => "enum_member",
            NodeKind::ParameterList => "parameter_list",
            NodeKind::ParameterDeclaration => "parameter_declaration",
            NodeKind::ReturnTypeList => "return_type_list",
            NodeKind::ReturnType => "return_type",
            NodeKind::ArgumentList => "argument_list",
            NodeKind::Argument => "argument",
            NodeKind::CompositeElement => "composite_element",
            NodeKind::Identifier => "identifier",
            NodeKind::NumberLiteral => "number_literal",
            NodeKind::StringLiteral => "string_literal",
            NodeKind::EscapeSequence => "escape_sequence",
            NodeKind::StringPlaceholder => "string_placeholder",
            NodeKind::BooleanLiteral => "boolean_literal",
            NodeKind::NullLiteral => "null_literal",
            NodeKind::UninitializedLiteral => "uninitialized_literal",
            NodeKind::FunctionCall => "function_call",
            NodeKind::MemberAccess => "member_access",
            NodeKind::ArrayAccess => "array_access",
            NodeKind::CastExpression => "cast_expression",
            NodeKind::UnaryExpression => "unary_expression",
            NodeKind::BinaryExpression => "binary_expression",
            NodeKind::ParenthesizedExpression => "parenthesized_expression",
            NodeKind::CompositeLiteral => "composite_literal",
            NodeKind::ArrayLiteral => "array_literal",
            NodeKind::RangeExpression => "range_expression",
            NodeKind::DirectiveExpression => "directive_expression",
            NodeKind::Annotation => "annotation",
            NodeKind::PointerType => "pointer_type",
            NodeKind::ArrayType => "array_type",
            NodeKind::ProcedureType => "procedure_type",
            NodeKind::PrimitiveType => "primitive_type",
            NodeKind::PolymorphicType => "polymorphic_type",
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of a child inside its parent.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Field {
    Name,
    Path,
    Namespace,
    Type,
    Default,
    Value,
    Values,
    Body,
    Condition,
    Consequence,
    Alternative,
    Iterator,
    Range,
    Parameters,
    ReturnType,
    Left,
    Right,
    Operator,
    Operand,
    Function,
    Arguments,
    Object,
    Member,
    Array,
    Index,
    Args,
    Delimiter,
    Content,
    EndDelimiter,
    Features,
    Op,
    Statement,
    Expression,
    Start,
    End,
    Pointee,
    Size,
    Element,
    BaseType,
    Polymorphic,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Path => "path",
            Field::Namespace => "namespace",
            Field::Type => "type",
            Field::Default => "default",
            Field::Value => "value",
            Field::Values => "values",
            Field::Body => "body",
            Field::Condition => "condition",
            Field::Consequence => "consequence",
            Field::Alternative => "alternative",
            Field::Iterator => "iterator",
            Field::Range => "range",
            Field::Parameters => "parameters",
            Field::ReturnType => "return_type",
            Field::Left => "left",
            Field::Right => "right",
            Field::Operator => "operator",
            Field::Operand => "operand",
            Field::Function => "function",
            Field::Arguments => "arguments",
            Field::Object => "object",
            Field::Member => "member",
            Field::Array => "array",
            Field::Index => "index",
            Field::Args => "args",
            Field::Delimiter => "delimiter",
            Field::Content => "content",
            Field::EndDelimiter => "end_delimiter",
            Field::Features => "features",
            Field::Op => "op",
            Field::Statement => "statement",
            Field::Expression => "expression",
            Field::Start => "start",
            Field::End => "end",
            Field::Pointee => "pointee",
            Field::Size => "size",
            Field::Element => "element",
            Field::BaseType => "base_type",
            Field::Polymorphic => "polymorphic",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
