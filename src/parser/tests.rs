//! Unit tests for the parser module.
//!
//! Trees are compared through their S-expression rendering, which shows
//! named nodes and fields only.

use std::collections::HashSet;

use pretty_assertions::assert_eq;

use crate::{
    cst::{
        kinds::{Field, NodeKind},
        tree::Tree,
    },
    errors::errors::ErrorImpl,
    lexer::{lexer::tokenize, trivia::attach_trivia},
    parse,
};

use super::{
    parser::Parser,
    resolver::{
        consult, for_has_iterator, looks_like_procedure, resolve, scan_name_list, Conflict,
        ConflictEntry, Lookahead, NameList, Peek, Window, Winner, CONFLICT_TABLE,
    },
};

fn sexp(source: &str) -> String {
    let tree = parse(source);
    assert_eq!(tree.root().text(), source, "tree must reproduce its source");
    tree.to_sexp()
}

fn parser_for(source: &str) -> Parser {
    Parser::new(attach_trivia(tokenize(source)))
}

fn first_statement_kind(tree: &Tree) -> Option<NodeKind> {
    tree.root().named_children().next().map(|node| node.kind())
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let tree = parse("1 + 2 * 3;");

    assert_eq!(
        tree.to_sexp(),
        "(source_file (expression_statement (binary_expression left: (number_literal) right: (binary_expression left: (number_literal) right: (number_literal)))))"
    );

    let statement = tree.root().named_children().next().unwrap();
    let binary = statement.named_children().next().unwrap();
    let operator = binary
        .child_by_field(Field::Operator)
        .and_then(|element| element.as_token())
        .map(|token| token.value.as_str());
    assert_eq!(operator, Some("+"));
}

#[test]
fn test_call_wraps_member_chain() {
    assert_eq!(
        sexp("a.b.c();"),
        "(source_file (expression_statement (function_call function: (member_access object: (member_access object: (identifier) member: (identifier)) member: (identifier)) arguments: (argument_list))))"
    );
}

#[test]
fn test_typed_declaration() {
    let tree = parse("x : int = 5;");

    assert_eq!(
        tree.to_sexp(),
        "(source_file (declaration name: (identifier) type: (primitive_type) value: (number_literal)))"
    );

    let declaration = tree.root().named_children().next().unwrap();
    assert_eq!(
        declaration.node_by_field(Field::Type).map(|node| node.text()),
        Some(" int".to_string())
    );
    assert_eq!(
        declaration.node_by_field(Field::Value).map(|node| node.text()),
        Some(" 5".to_string())
    );
}

#[test]
fn test_assignment_without_colon() {
    assert_eq!(
        sexp("x = 5;"),
        "(source_file (assignment left: (identifier) right: (number_literal)))"
    );
}

#[test]
fn test_compound_and_multiple_assignment() {
    assert_eq!(
        sexp("x += 1;\na, b = b, a;"),
        "(source_file (assignment left: (identifier) right: (number_literal)) (assignment left: (identifier) left: (identifier) right: (identifier) right: (identifier)))"
    );
}

#[test]
fn test_struct_declaration() {
    assert_eq!(
        sexp("Foo :: struct { a: int; }"),
        "(source_file (struct_declaration name: (identifier) body: (struct_body (struct_member name: (identifier) type: (primitive_type)))))"
    );
}

#[test]
fn test_struct_member_defaults_and_directives() {
    assert_eq!(
        sexp("Foo :: struct {\n    x, y: float = 1;\n    data: [4] u8 #align 64;\n    using base: Base;\n}"),
        "(source_file (struct_declaration name: (identifier) body: (struct_body (struct_member name: (identifier) name: (identifier) type: (primitive_type) default: (number_literal)) (struct_member name: (identifier) type: (array_type size: (number_literal) element: (primitive_type)) (directive_expression (number_literal))) (using_statement statement: (declaration name: (identifier) type: (identifier))))))"
    );
}

#[test]
fn test_enum_declaration() {
    assert_eq!(
        sexp("B :: enum u8 { X; Y :: 2; }"),
        "(source_file (enum_declaration name: (identifier) base_type: (primitive_type) body: (enum_body (enum_member name: (identifier)) (enum_member name: (identifier) value: (number_literal)))))"
    );
}

#[test]
fn test_for_with_iterator_and_range() {
    assert_eq!(
        sexp("for i: 0..10 { }"),
        "(source_file (for_statement iterator: (identifier) range: (range_expression start: (number_literal) end: (number_literal)) body: (block)))"
    );
}

#[test]
fn test_for_without_iterator() {
    assert_eq!(
        sexp("for items print(it);"),
        "(source_file (for_statement range: (identifier) body: (expression_statement (function_call function: (identifier) arguments: (argument_list (argument (identifier)))))))"
    );
}

#[test]
fn test_function_declaration() {
    assert_eq!(
        sexp("add :: (a: int, b: int) -> int { return a + b; }"),
        "(source_file (function_declaration name: (identifier) parameters: (parameter_list (parameter_declaration name: (identifier) type: (primitive_type)) (parameter_declaration name: (identifier) type: (primitive_type))) return_type: (return_type_list (return_type type: (primitive_type))) body: (block (return_statement values: (binary_expression left: (identifier) right: (identifier))))))"
    );
}

#[test]
fn test_operator_overload() {
    let tree = parse("operator + :: (a: V, b: V) -> V { return a; }");

    assert_eq!(
        tree.to_sexp(),
        "(source_file (function_declaration parameters: (parameter_list (parameter_declaration name: (identifier) type: (identifier)) (parameter_declaration name: (identifier) type: (identifier))) return_type: (return_type_list (return_type type: (identifier))) body: (block (return_statement values: (identifier)))))"
    );

    let function = tree.root().named_children().next().unwrap();
    let op = function
        .child_by_field(Field::Op)
        .and_then(|element| element.as_token())
        .map(|token| token.value.as_str());
    assert_eq!(op, Some("+"));
}

#[test]
fn test_annotation_attaches_to_declaration() {
    assert_eq!(
        sexp("@note\nfoo :: () { }"),
        "(source_file (function_declaration (annotation name: (identifier)) name: (identifier) body: (block)))"
    );
}

#[test]
fn test_switch_if_with_cases() {
    assert_eq!(
        sexp("if x == {\n    case 1; a();\n    case; b();\n}"),
        "(source_file (if_statement condition: (identifier) consequence: (block (case_statement value: (number_literal) body: (expression_statement (function_call function: (identifier) arguments: (argument_list)))) (case_statement body: (expression_statement (function_call function: (identifier) arguments: (argument_list)))))))"
    );
}

#[test]
fn test_compile_time_if() {
    assert_eq!(
        sexp("#if OS == .WINDOWS { a :: 1; } else { a :: 2; }"),
        "(source_file (directive_statement condition: (binary_expression left: (identifier) right: (member_access member: (identifier))) consequence: (block (declaration name: (identifier) value: (number_literal))) alternative: (block (declaration name: (identifier) value: (number_literal)))))"
    );
}

#[test]
fn test_return_values_stay_on_their_line() {
    assert_eq!(
        sexp("f :: () {\n    return\n    x();\n}"),
        "(source_file (function_declaration name: (identifier) body: (block (return_statement) (expression_statement (function_call function: (identifier) arguments: (argument_list))))))"
    );
}

#[test]
fn test_imports_and_scope() {
    assert_eq!(
        sexp("#import \"Basic\";\nMath :: #import \"Math\";\n#scope_file\n#load \"other.jai\";"),
        "(source_file (import_statement path: (string_literal)) (import_statement namespace: (identifier) path: (string_literal)) (directive_statement (scope_directive)) (load_statement path: (string_literal)))"
    );
}

#[test]
fn test_foreign_library() {
    assert_eq!(
        sexp("libc :: #foreign_library \"libc\";"),
        "(source_file (foreign_library_statement name: (identifier) path: (string_literal)))"
    );
}

#[test]
fn test_asm_block() {
    assert_eq!(
        sexp("#asm AVX { mov a, b; }"),
        "(source_file (asm_block features: (identifier)))"
    );
}

#[test]
fn test_string_pieces_are_children() {
    assert_eq!(
        sexp("print(\"a\\n%1 %\", x);"),
        "(source_file (expression_statement (function_call function: (identifier) arguments: (argument_list (argument (string_literal (escape_sequence) (string_placeholder) (string_placeholder))) (argument (identifier))))))"
    );
}

#[test]
fn test_here_string_fields() {
    let tree = parse("s := #string END\nhello\nEND;");

    assert_eq!(
        tree.to_sexp(),
        "(source_file (declaration name: (identifier) value: (string_literal delimiter: (identifier) end_delimiter: (identifier))))"
    );

    let declaration = tree.root().named_children().next().unwrap();
    let string = declaration.node_by_field(Field::Value).unwrap();
    let content = string
        .child_by_field(Field::Content)
        .and_then(|element| element.as_token())
        .map(|token| token.value.as_str());
    assert_eq!(content, Some("\nhello\n"));
}

#[test]
fn test_composite_literal_elements() {
    assert_eq!(
        sexp("p := Vector3.{x = 1, .y = 2, 3};"),
        "(source_file (declaration name: (identifier) value: (composite_literal type: (identifier) (composite_element name: (identifier) value: (number_literal)) (composite_element member: (identifier) value: (number_literal)) (composite_element (number_literal)))))"
    );
}

#[test]
fn test_array_literal_with_array_type() {
    assert_eq!(
        sexp("a := [4] int.[1, 2, 3, 4];"),
        "(source_file (declaration name: (identifier) value: (array_literal type: (array_type size: (number_literal) element: (primitive_type)) (number_literal) (number_literal) (number_literal) (number_literal))))"
    );
}

#[test]
fn test_pointer_type_collects_stars() {
    assert_eq!(
        sexp("p: **int;"),
        "(source_file (declaration name: (identifier) type: (pointer_type pointee: (primitive_type))))"
    );
}

#[test]
fn test_casts() {
    assert_eq!(
        sexp("y := cast,trunc(u8) x;\nn: u8 = xx big;"),
        "(source_file (declaration name: (identifier) value: (cast_expression type: (primitive_type) value: (identifier))) (declaration name: (identifier) type: (primitive_type) value: (cast_expression value: (identifier))))"
    );
}

#[test]
fn test_ifx_expression() {
    assert_eq!(
        sexp("m := ifx a > b then a else b;"),
        "(source_file (declaration name: (identifier) value: (if_statement condition: (binary_expression left: (identifier) right: (identifier)) consequence: (identifier) alternative: (identifier))))"
    );
}

#[test]
fn test_keyword_used_as_name() {
    assert_eq!(
        sexp("remove := false;"),
        "(source_file (declaration name: (identifier) value: (boolean_literal)))"
    );
}

#[test]
fn test_using_with_filter() {
    assert_eq!(
        sexp("using,only(a, b) M;"),
        "(source_file (using_statement (argument_list (argument (identifier)) (argument (identifier))) expression: (identifier)))"
    );
}

#[test]
fn test_comments_are_kept() {
    assert_eq!(
        sexp("// hi\nx := 1;"),
        "(source_file (declaration name: (identifier (comment_line)) value: (number_literal)))"
    );
}

#[test]
fn test_unterminated_string_is_one_error() {
    let source = "\"abc";
    let tree = parse(source);
    let errors = tree.error_nodes();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].span().start.0, 0);
    assert_eq!(errors[0].span().end.0, 4);
    assert!(matches!(
        errors[0].error().map(|error| error.get_impl()),
        Some(ErrorImpl::UnterminatedString)
    ));
    assert_eq!(tree.root().text(), source);
}

#[test]
fn test_here_string_delimiter_mismatch_is_an_error() {
    let tree = parse("#string A abc B");

    assert!(tree.has_errors());
    assert!(tree.errors().iter().any(|error| matches!(
        error.get_impl(),
        ErrorImpl::HereStringDelimiterMismatch { .. }
    )));
}

#[test]
fn test_recovery_skips_to_semicolon() {
    let tree = parse("x := ;\ny := 2;");

    assert_eq!(
        tree.to_sexp(),
        "(source_file (ERROR) (declaration name: (identifier) value: (number_literal)))"
    );

    let errors = tree.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_position().0, 5);
    assert!(matches!(
        errors[0].get_impl(),
        ErrorImpl::ExpectedExpression { .. }
    ));
}

#[test]
fn test_recovery_inside_block() {
    assert_eq!(
        sexp("f :: () {\n    x := ;\n    y := 1;\n}"),
        "(source_file (function_declaration name: (identifier) body: (block (ERROR) (declaration name: (identifier) value: (number_literal)))))"
    );
}

#[test]
fn test_recovery_consumes_balanced_braces() {
    assert_eq!(
        sexp("foo :: ( { a; } b := 1;"),
        "(source_file (ERROR) (declaration name: (identifier) value: (number_literal)))"
    );
}

#[test]
fn test_stray_close_curly() {
    assert_eq!(
        sexp("}\nx := 1;"),
        "(source_file (ERROR) (declaration name: (identifier) value: (number_literal)))"
    );
}

#[test]
fn test_lexical_error_between_statements() {
    let tree = parse("x := 1 ? 2;");

    assert_eq!(
        tree.to_sexp(),
        "(source_file (declaration name: (identifier) value: (number_literal)) (ERROR) (expression_statement (number_literal)))"
    );
    assert_eq!(tree.errors().len(), 1);
}

#[test]
fn test_misplaced_directive() {
    let tree = parse("x := #load \"a.jai\";");
    let errors = tree.errors();

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_impl(),
        &ErrorImpl::MisplacedDirective {
            directive: "#load".to_string(),
        }
    );
    assert_eq!(errors[0].get_position().0, 5);
}

#[test]
fn test_lexical_error_inside_recovered_statement_is_reported_once() {
    let source = "foo(\"abc";
    let tree = parse(source);
    let errors = tree.errors();

    assert_eq!(tree.to_sexp(), "(source_file (ERROR))");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_impl(), &ErrorImpl::UnterminatedString);
    assert_eq!(errors[0].get_position().0, 4);
    assert_eq!(tree.root().text(), source);
}

/// An input that reaches the decision point of `conflict`, and the kind of
/// the statement it must produce.
fn witness(conflict: Conflict) -> (&'static str, NodeKind) {
    match conflict {
        Conflict::StructEnum => ("A :: struct { x: int; }", NodeKind::StructDeclaration),
        Conflict::CallMember => ("a.b.c();", NodeKind::ExpressionStatement),
        Conflict::DeclarationAssignment => ("x : int = 5;", NodeKind::Declaration),
        Conflict::TypeIdentifier => ("x : float;", NodeKind::Declaration),
        Conflict::ExpressionCompositeLiteral => ("v := Vector2.{1, 2};", NodeKind::Declaration),
        Conflict::ParameterDeclaration => {
            ("f :: (a: int, b: float) { }", NodeKind::FunctionDeclaration)
        }
        Conflict::DirectiveType => ("T :: #type,distinct u32;", NodeKind::Declaration),
        Conflict::DirectiveProcedureType => {
            ("cb: (x: int) -> int #c_call;", NodeKind::Declaration)
        }
        Conflict::DeclarationExpression => ("print(\"hi\");", NodeKind::ExpressionStatement),
        Conflict::TypeExpression => ("a := [4] int.[1, 2, 3, 4];", NodeKind::Declaration),
        Conflict::DirectiveStatementExpression => ("#run main();", NodeKind::DirectiveStatement),
        Conflict::FunctionDeclarationExpression => (
            "add :: (a: int, b: int) -> int { return a + b; }",
            NodeKind::FunctionDeclaration,
        ),
        Conflict::DirectiveRange => ("for #run 0..N { }", NodeKind::ForStatement),
        Conflict::ParameterExpression => ("f :: (a: int = 3) { }", NodeKind::FunctionDeclaration),
        Conflict::CastRange => ("for cast(int) a..b { }", NodeKind::ForStatement),
        Conflict::PointerType => ("p: **int;", NodeKind::Declaration),
        Conflict::StatementIf => ("if x { y(); } else z();", NodeKind::IfStatement),
        Conflict::StatementWhile => ("while i < 10 i += 1;", NodeKind::WhileStatement),
        Conflict::StatementFor => ("for items print(it);", NodeKind::ForStatement),
        Conflict::StatementDefer => ("defer free(p);", NodeKind::DeferStatement),
        Conflict::ForArrayAccessUnary => ("for * items { }", NodeKind::ForStatement),
        Conflict::ForMemberAccessUnary => ("for it, i: list { }", NodeKind::ForStatement),
        Conflict::ForBinary => ("for < i: 0..9 { }", NodeKind::ForStatement),
        Conflict::TypeParameterExpression => {
            ("f :: (int, $T: Type) { }", NodeKind::FunctionDeclaration)
        }
        Conflict::TypeFunctionDeclaration => (
            "Callback :: #type (x: int) -> int;",
            NodeKind::FunctionDeclaration,
        ),
        Conflict::TypeStructDeclaration => {
            ("Node :: union { i: int; f: float; }", NodeKind::StructDeclaration)
        }
        Conflict::TypeEnumDeclaration => ("Flags :: enum_flags { A; B; }", NodeKind::EnumDeclaration),
        Conflict::FunctionDeclaration => (
            "strlen :: (s: *u8) -> int #foreign libc;",
            NodeKind::FunctionDeclaration,
        ),
        Conflict::ProcedureType => ("handler: (x: int) #c_call = null;", NodeKind::Declaration),
        Conflict::ProcedureTypeFunctionDeclaration => (
            "exit :: (code: s32) #foreign libc;",
            NodeKind::FunctionDeclaration,
        ),
        Conflict::DirectiveFunctionDeclaration => {
            ("tick :: ()\n#no_context { }", NodeKind::FunctionDeclaration)
        }
        Conflict::DirectiveProcedureTypeFunctionDeclaration => (
            "fast :: inline (x: int) -> int { return x; }",
            NodeKind::FunctionDeclaration,
        ),
        Conflict::TypeReturnType => (
            "divmod :: (a: int, b: int) -> (q: int, r: int) { return a / b, a % b; }",
            NodeKind::FunctionDeclaration,
        ),
        Conflict::ReturnTypeList => (
            "apply :: (f: (int) -> int, x: int) -> int { return f(x); }",
            NodeKind::FunctionDeclaration,
        ),
    }
}

#[test]
fn test_conflict_table_has_one_entry_per_conflict() {
    let unique: HashSet<Conflict> = CONFLICT_TABLE.iter().map(|entry| entry.conflict).collect();

    assert_eq!(CONFLICT_TABLE.len(), 34);
    assert_eq!(unique.len(), CONFLICT_TABLE.len());
}

/// Tokens starting at the decision point of `conflict`, and the alternative
/// the conflict must pick there.
fn decision(conflict: Conflict) -> (&'static str, Winner) {
    match conflict {
        Conflict::StructEnum => ("struct { }", Winner::StructDeclaration),
        Conflict::CallMember => ("(x)", Winner::FunctionCall),
        Conflict::DeclarationAssignment => ("a, b := 1, 2", Winner::Declaration),
        Conflict::TypeIdentifier => ("float", Winner::PrimitiveType),
        Conflict::ExpressionCompositeLiteral => (".{1, 2}", Winner::CompositeLiteral),
        Conflict::ParameterDeclaration => ("using e: Entity", Winner::ParameterDeclaration),
        Conflict::DirectiveType => ("u32", Winner::TypeExpression),
        Conflict::DirectiveProcedureType => ("#c_call", Winner::ProcedureType),
        Conflict::DeclarationExpression => ("print(\"hi\")", Winner::Expression),
        Conflict::TypeExpression => ("[4] int", Winner::TypeExpression),
        Conflict::DirectiveStatementExpression => ("#run main()", Winner::DirectiveStatement),
        Conflict::FunctionDeclarationExpression => {
            ("(a: int) -> int", Winner::FunctionDeclaration)
        }
        Conflict::DirectiveRange => (".. N", Winner::RangeExpression),
        Conflict::ParameterExpression => ("= 3", Winner::DefaultValue),
        Conflict::CastRange => (".. b", Winner::RangeExpression),
        Conflict::PointerType => ("*int", Winner::PointerType),
        Conflict::StatementIf => ("{ }", Winner::Block),
        Conflict::StatementWhile => ("i += 1;", Winner::Statement),
        Conflict::StatementFor => ("{ }", Winner::Block),
        Conflict::StatementDefer => ("free(p);", Winner::Statement),
        Conflict::ForArrayAccessUnary => ("* items", Winner::ForMarker),
        Conflict::ForMemberAccessUnary => ("it, i: list", Winner::Iterator),
        Conflict::ForBinary => ("< i: 0..9", Winner::ForMarker),
        Conflict::TypeParameterExpression => ("$T: Type", Winner::PolymorphicType),
        Conflict::TypeFunctionDeclaration => {
            ("#type (x: int) -> int", Winner::FunctionDeclaration)
        }
        Conflict::TypeStructDeclaration => ("union {", Winner::StructDeclaration),
        Conflict::TypeEnumDeclaration => ("enum_flags {", Winner::EnumDeclaration),
        Conflict::FunctionDeclaration => ("{ }", Winner::Block),
        Conflict::ProcedureType => ("#c_call", Winner::ProcedureType),
        Conflict::ProcedureTypeFunctionDeclaration => (";", Winner::FunctionDeclaration),
        Conflict::DirectiveFunctionDeclaration => ("#no_context", Winner::FunctionDeclaration),
        Conflict::DirectiveProcedureTypeFunctionDeclaration => {
            ("inline (x: int)", Winner::ProcedureType)
        }
        Conflict::TypeReturnType => ("q: int", Winner::ReturnType),
        Conflict::ReturnTypeList => (", x: int", Winner::ParameterList),
    }
}

#[test]
fn test_every_conflict_picks_its_winner() {
    for entry in CONFLICT_TABLE {
        let (source, expected) = decision(entry.conflict);
        let mut parser = parser_for(source);
        if entry.conflict == Conflict::ReturnTypeList {
            parser.parameter_depth = 1;
        }

        assert_eq!(
            consult(&parser, entry.conflict),
            Ok(expected),
            "{:?}: {}",
            entry.conflict,
            source
        );
        assert!(entry.winners.contains(&expected));
    }
}

#[test]
fn test_conflicts_pick_the_other_alternative() {
    let cases = [
        (Conflict::StructEnum, "foo()", Winner::Declaration),
        (Conflict::CallMember, "\n(x)", Winner::MemberAccess),
        (Conflict::DeclarationAssignment, "a, b = b, a", Winner::Assignment),
        (Conflict::TypeIdentifier, "Vector2", Winner::Identifier),
        (Conflict::ExpressionCompositeLiteral, ".x", Winner::MemberAccess),
        (Conflict::DirectiveType, "\nu32", Winner::DirectiveExpression),
        (Conflict::TypeExpression, "(1 + 2)", Winner::Expression),
        (Conflict::DirectiveStatementExpression, "#string A\nx\nA", Winner::Expression),
        (Conflict::ParameterExpression, ")", Winner::ParameterDeclaration),
        (Conflict::PointerType, "int", Winner::TypeExpression),
        (Conflict::ForMemberAccessUnary, "a.b", Winner::Expression),
        (Conflict::TypeParameterExpression, "int", Winner::TypeExpression),
        (Conflict::TypeStructDeclaration, "struct;", Winner::TypeExpression),
        (Conflict::FunctionDeclaration, "#foreign libc;", Winner::FunctionDeclaration),
        (Conflict::ProcedureType, "\n#c_call", Winner::Statement),
        (Conflict::DirectiveFunctionDeclaration, "\n#run f();", Winner::Statement),
        (Conflict::DirectiveProcedureTypeFunctionDeclaration, "inline f()", Winner::Expression),
        (Conflict::TypeReturnType, "int", Winner::TypeExpression),
        (Conflict::ReturnTypeList, ", int", Winner::ReturnTypeList),
    ];

    for (conflict, source, expected) in cases {
        assert_eq!(
            consult(&parser_for(source), conflict),
            Ok(expected),
            "{:?}: {:?}",
            conflict,
            source
        );
    }
}

fn peeks_past_its_bound(window: &Window) -> Winner {
    window.kind_at(2);
    Winner::Expression
}

fn picks_an_unlisted_winner(_window: &Window) -> Winner {
    Winner::Block
}

#[test]
fn test_decision_outside_its_entry_is_unresolved() {
    let parser = parser_for("a b c");

    let too_far = ConflictEntry {
        conflict: Conflict::TypeExpression,
        rules: &["type_expression", "_expression"],
        discriminator: "",
        lookahead: Lookahead::Fixed(1),
        winners: &[Winner::Expression],
        decide: peeks_past_its_bound,
    };
    let error = resolve(&too_far, &parser, 0).unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnresolvedConflict {
            rules: "type_expression, _expression".to_string(),
        }
    );

    let unlisted = ConflictEntry {
        conflict: Conflict::TypeExpression,
        rules: &["type_expression", "_expression"],
        discriminator: "",
        lookahead: Lookahead::Fixed(3),
        winners: &[Winner::Expression],
        decide: picks_an_unlisted_winner,
    };
    assert!(resolve(&unlisted, &parser, 0).is_err());
}

#[test]
fn test_name_list_lookahead_grows_with_the_list() {
    let parser = parser_for("a, b, c, d, e, f :: 1, 2, 3, 4, 5, 6;");

    assert_eq!(
        consult(&parser, Conflict::DeclarationAssignment),
        Ok(Winner::Declaration)
    );
}

#[test]
fn test_every_conflict_has_a_deterministic_witness() {
    for entry in CONFLICT_TABLE {
        let (source, expected) = witness(entry.conflict);
        let tree = parse(source);

        assert!(
            !tree.has_errors(),
            "{:?}: {} -> {}",
            entry.conflict,
            source,
            tree.to_sexp()
        );
        assert_eq!(
            first_statement_kind(&tree),
            Some(expected),
            "{:?}: {}",
            entry.conflict,
            source
        );
        assert_eq!(tree.to_sexp(), parse(source).to_sexp());
        assert_eq!(tree.root().text(), source);
    }
}

#[test]
fn test_return_list_inside_parameter_list_stops_at_comma() {
    assert_eq!(
        sexp("apply :: (f: (int) -> int, x: int) { }"),
        "(source_file (function_declaration name: (identifier) parameters: (parameter_list (parameter_declaration name: (identifier) type: (procedure_type parameters: (parameter_list (parameter_declaration type: (primitive_type))) return_type: (return_type_list (return_type type: (primitive_type))))) (parameter_declaration name: (identifier) type: (primitive_type))) body: (block)))"
    );
}

#[test]
fn test_procedure_suffix_on_the_next_line() {
    assert_eq!(
        sexp("tick :: ()\n#no_context { }"),
        "(source_file (function_declaration name: (identifier) (directive_expression) body: (block)))"
    );
}

#[test]
fn test_scan_name_list() {
    let parser = parser_for("a, b : int");

    assert_eq!(
        scan_name_list(&parser, 0),
        Some(NameList {
            names: 2,
            colon_offset: 3,
            colon: crate::lexer::tokens::TokenKind::Colon,
        })
    );
    assert_eq!(scan_name_list(&parser_for("a = b"), 0), None);
}

#[test]
fn test_looks_like_procedure() {
    assert!(looks_like_procedure(&parser_for("(x) -> int"), 0));
    assert!(looks_like_procedure(&parser_for("(x: int)"), 0));
    assert!(looks_like_procedure(&parser_for("()"), 0));
    assert!(!looks_like_procedure(&parser_for("(x) + 1"), 0));
    assert!(!looks_like_procedure(&parser_for("(1 + 2)"), 0));
}

#[test]
fn test_for_has_iterator() {
    assert!(for_has_iterator(&parser_for("i: 0..10")).unwrap());
    assert!(for_has_iterator(&parser_for("it, index: list")).unwrap());
    assert!(!for_has_iterator(&parser_for("list")).unwrap());
    assert!(!for_has_iterator(&parser_for("a.b")).unwrap());
}
