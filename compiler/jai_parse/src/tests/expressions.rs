//! Expression tests.

use pretty_assertions::assert_eq;

use super::sexp;
use crate::{parse, ParseOptions, Parser};
use jai_diagnostic::ErrorCode;
use jai_ir::{FieldName, SyntaxKind, TokenKind};

/// Render the value of `x := <expr>;`.
fn value(expr: &str) -> String {
    let tree = sexp(&format!("x := {expr};"));
    let prefix = "(source_file (variable_declaration name: (identifier) value: ";
    tree.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix("))"))
        .unwrap_or_else(|| panic!("not a single declaration: {tree}"))
        .to_string()
}

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(
        value("1 + 2 * 3"),
        "(binary_expression left: (integer) right: (binary_expression left: (integer) right: (integer)))"
    );
}

#[test]
fn test_left_associative() {
    assert_eq!(
        value("a - b - c"),
        "(binary_expression left: (binary_expression left: (identifier) right: (identifier)) \
         right: (identifier))"
    );
}

#[test]
fn test_logical_precedence() {
    assert_eq!(
        value("a || b && c"),
        "(binary_expression left: (identifier) right: (binary_expression left: (identifier) \
         right: (identifier)))"
    );
    assert_eq!(
        value("a == b || c < d"),
        "(binary_expression left: (binary_expression left: (identifier) right: (identifier)) \
         right: (binary_expression left: (identifier) right: (identifier)))"
    );
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    assert_eq!(
        value("-a * b"),
        "(binary_expression left: (unary_expression argument: (identifier)) right: (identifier))"
    );
}

#[test]
fn test_ampersand_by_position() {
    assert_eq!(value("&b"), "(unary_expression argument: (identifier))");
    assert_eq!(
        value("a & b"),
        "(binary_expression left: (identifier) right: (identifier))"
    );
    assert_eq!(
        value("a & &b"),
        "(binary_expression left: (identifier) right: (unary_expression argument: (identifier)))"
    );

    let parse = parse("x := &b;");
    let unary = parse.tree().find(SyntaxKind::UnaryExpression).unwrap();
    let operator = unary.field(FieldName::Operator).unwrap();
    assert_eq!(operator.as_token().unwrap().kind, TokenKind::Amp);
}

#[test]
fn test_casts() {
    assert_eq!(
        value("cast(float) a + 1"),
        "(binary_expression left: (cast_expression type: (builtin_type) value: (identifier)) \
         right: (integer))"
    );
    assert_eq!(
        value("cast,no_check(u8) a"),
        "(cast_expression modifier: (identifier) type: (builtin_type) value: (identifier))"
    );
    assert_eq!(value("xx a"), "(cast_expression value: (identifier))");
}

#[test]
fn test_call_arguments() {
    assert_eq!(
        sexp("f(, 2, name = 3, ..rest);"),
        "(source_file (call_expression function: (identifier) argument: (integer) \
         argument: (named_argument name: (identifier) value: (integer)) \
         argument: (spread_argument value: (identifier))))"
    );
}

#[test]
fn test_inline_call() {
    assert_eq!(
        value("inline f(a)"),
        "(call_expression function: (identifier) argument: (identifier))"
    );
}

#[test]
fn test_member_call_and_index() {
    assert_eq!(
        sexp("v.normalize();"),
        "(source_file (call_expression function: (member_expression object: (identifier) \
         member: (identifier))))"
    );
    assert_eq!(
        value("m[i, j]"),
        "(index_expression object: (identifier) index: (identifier) index: (identifier))"
    );
}

#[test]
fn test_dereference_forms() {
    assert_eq!(value("p.*"), "(dereference_expression argument: (identifier))");
    assert_eq!(value("<< p"), "(pointer_expression argument: (identifier))");
}

#[test]
fn test_trailing_star_dereferences() {
    assert_eq!(
        value("a.b*"),
        "(dereference_expression argument: (member_expression object: (identifier) \
         member: (identifier)))"
    );
}

#[test]
fn test_star_between_operands_multiplies() {
    assert_eq!(
        value("a.b * c"),
        "(binary_expression left: (member_expression object: (identifier) member: (identifier)) \
         right: (identifier))"
    );
}

#[test]
fn test_prefix_star_takes_address() {
    assert_eq!(value("*x"), "(address (identifier))");
}

#[test]
fn test_struct_literals() {
    assert_eq!(
        value("Vec.{x = 1}"),
        "(struct_literal type: (identifier) element: (assignment_statement left: (identifier) \
         right: (integer)))"
    );
    assert_eq!(
        sexp("v : Vec = .{1, 2};"),
        "(source_file (variable_declaration name: (identifier) type: (identifier) \
         value: (struct_literal element: (integer) element: (integer))))"
    );
}

#[test]
fn test_typed_literal_reinterprets_call_as_type() {
    assert_eq!(
        value("Vector2(f32).{1, 2}"),
        "(struct_literal type: (parameterized_struct_type type: (identifier) \
         argument: (identifier)) element: (integer) element: (integer))"
    );
}

#[test]
fn test_typed_literal_reinterprets_member_as_type() {
    assert_eq!(
        value("Math.Vec.{}"),
        "(struct_literal type: (qualified_type object: (identifier) member: (identifier)))"
    );
}

#[test]
fn test_array_literals() {
    assert_eq!(
        value("int.[1, 2]"),
        "(array_literal type: (builtin_type) element: (integer) element: (integer))"
    );
    assert_eq!(
        value("[2]int.[1, 2]"),
        "(array_literal type: (array_type size: (integer) element: (builtin_type)) \
         element: (integer) element: (integer))"
    );
}

#[test]
fn test_if_expression() {
    assert_eq!(
        value("ifx a then 1 else 2"),
        "(if_expression condition: (identifier) consequence: (integer) alternative: (integer))"
    );
    assert_eq!(
        value("ifx a { 1; } else { 2; }"),
        "(if_expression condition: (identifier) consequence: (if_expression_block (integer)) \
         alternative: (if_expression_block (integer)))"
    );
}

#[test]
fn test_quick_procedures() {
    assert_eq!(
        value("x => x * x"),
        "(quick_procedure parameters: (identifier) body: (binary_expression left: (identifier) \
         right: (identifier)))"
    );
    assert_eq!(
        value("(a, b) => a + b"),
        "(quick_procedure parameters: (identifier) parameters: (identifier) \
         body: (binary_expression left: (identifier) right: (identifier)))"
    );
}

#[test]
fn test_quick_procedure_with_typed_parameters() {
    assert_eq!(
        value("(x: int, y) => x * y"),
        "(quick_procedure parameters: (parameter name: (identifier) type: (builtin_type)) \
         parameters: (identifier) body: (binary_expression left: (identifier) right: (identifier)))"
    );

    let parse = parse("f :: (x: int) => x * 2;");
    assert!(parse.errors().is_empty(), "{:?}", parse.errors());
    let quick = parse.tree().find(SyntaxKind::QuickProcedure).unwrap();
    assert_eq!(quick.fields(FieldName::Parameters).count(), 1);
    assert!(parse.tree().find(SyntaxKind::ProcedureType).is_none());
}

#[test]
fn test_literals() {
    assert_eq!(
        value("true && null"),
        "(binary_expression left: (boolean) right: (null))"
    );
    assert_eq!(value("\"a\\n\""), "(string (string_content) (escape_sequence))");
    assert_eq!(value("#char \"a\""), "(string (string_content))");
}

#[test]
fn test_heredoc() {
    assert_eq!(
        value("#string END\nhello\nEND"),
        "(heredoc_string (heredoc_start) (heredoc_body) (heredoc_end))"
    );
}

#[test]
fn test_unterminated_heredoc_reports_once() {
    let parse = parse("s := #string END\nnever ends");
    let codes: Vec<ErrorCode> = parse.errors().iter().map(|e| e.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0006]);
    assert!(parse.tree().has_error());
}

#[test]
fn test_run_expressions() {
    assert_eq!(
        sexp("x :: #run compute();"),
        "(source_file (const_declaration name: (identifier) value: (run_expression \
         value: (call_expression function: (identifier)))))"
    );
    assert_eq!(
        sexp("x :: #run -> int { return 1; };"),
        "(source_file (const_declaration name: (identifier) value: (run_expression \
         result: (builtin_type) body: (block (return_statement value: (integer))))))"
    );
}

#[test]
fn test_directive_expressions() {
    assert_eq!(value("#caller_location"), "(directive_expression)");
    assert_eq!(
        value("#code a + b"),
        "(directive_expression argument: (binary_expression left: (identifier) right: (identifier)))"
    );
    assert_eq!(
        value("#library \"libc\""),
        "(library_directive path: (string (string_content)))"
    );
}

#[test]
fn test_type_of() {
    assert_eq!(value("type_of(a)"), "(type_of_expression argument: (identifier))");
}

#[test]
fn test_statement_keyword_is_not_an_expression() {
    let parse = parse("x := return;");
    let codes: Vec<ErrorCode> = parse.errors().iter().map(|e| e.code).collect();
    assert_eq!(codes, vec![ErrorCode::E1002]);
}

#[test]
fn test_declared_conflict_is_settled_silently() {
    let source = "f(x);";
    let tokens = jai_lexer::lex(source).tokens;
    let options = ParseOptions::default();
    let mut parser = Parser::new(source, &tokens, &options);
    let chosen = parser.decide(&[
        SyntaxKind::CallExpression,
        SyntaxKind::ParameterizedStructType,
    ]);
    assert_eq!(chosen, SyntaxKind::CallExpression);
    let (_, errors) = parser.into_parts();
    assert!(errors.is_empty());
}

#[test]
fn test_undeclared_conflict_reports_ambiguity() {
    let source = "f(x);";
    let tokens = jai_lexer::lex(source).tokens;
    let options = ParseOptions::default();
    let mut parser = Parser::new(source, &tokens, &options);
    let chosen = parser.decide(&[SyntaxKind::Block, SyntaxKind::CallExpression]);
    // Highest dynamic precedence wins the fallback.
    assert_eq!(chosen, SyntaxKind::CallExpression);
    let (_, errors) = parser.into_parts();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::E2001);
}
