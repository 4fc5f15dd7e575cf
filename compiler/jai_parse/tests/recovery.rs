//! Error recovery through the public API.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use jai_diagnostic::{ErrorCategory, ErrorCode};
use jai_ir::{SyntaxKind, SyntaxNode};
use jai_parse::{parse, parse_with_options, try_parse, InputError, ParseOptions};
use pretty_assertions::assert_eq;

fn error_nodes(tree: &SyntaxNode) -> Vec<&SyntaxNode> {
    tree.descendants()
        .filter(|node| node.kind() == SyntaxKind::Error)
        .collect()
}

#[test]
fn malformed_assignment_is_contained() {
    let source = "f :: () { a = ; b := 1; }";
    let parse = parse(source);

    let errors = error_nodes(parse.tree());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].text(source), "a = ;");

    let block = parse.tree().find(SyntaxKind::Block).unwrap();
    let kinds: Vec<SyntaxKind> = block.child_nodes().map(SyntaxNode::kind).collect();
    assert_eq!(kinds, vec![SyntaxKind::Error, SyntaxKind::VariableDeclaration]);
    let decl = block.find(SyntaxKind::VariableDeclaration).unwrap();
    assert_eq!(decl.text(source), "b := 1");
    assert!(!decl.has_error());

    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].category, ErrorCategory::Structural);
}

#[test]
fn each_bad_statement_gets_its_own_error() {
    let source = "a := ;\nb := 2;\nc := );\nd := 4;";
    let parse = parse(source);
    assert_eq!(error_nodes(parse.tree()).len(), 2);
    assert_eq!(parse.errors().len(), 2);

    let good: Vec<&SyntaxNode> = parse
        .tree()
        .child_nodes()
        .filter(|node| node.kind() == SyntaxKind::VariableDeclaration)
        .collect();
    assert_eq!(good.len(), 2);
}

#[test]
fn errors_are_ordered_by_position() {
    // The lexer reports first, but the string comes last in the source.
    let parse = parse("x := );\ny := \"open");
    let codes: Vec<ErrorCode> = parse.errors().iter().map(|e| e.code).collect();
    assert_eq!(codes, vec![ErrorCode::E1002, ErrorCode::E0001]);
    assert!(parse.errors()[0].span.start < parse.errors()[1].span.start);
}

#[test]
fn lexical_errors_come_through_parse() {
    let parse = parse("x := 1 ` 2;");
    assert!(parse
        .errors()
        .iter()
        .any(|e| e.code == ErrorCode::E0002 && e.category == ErrorCategory::Lexical));
}

#[test]
fn unclosed_brace_does_not_lose_the_body() {
    let source = "main :: () {\n    x := 1;\n    f(x);\n";
    let parse = parse(source);
    let codes: Vec<ErrorCode> = parse.errors().iter().map(|e| e.code).collect();
    assert_eq!(codes, vec![ErrorCode::E1003]);
    let block = parse.tree().find(SyntaxKind::Block).unwrap();
    assert_eq!(block.child_nodes().count(), 2);
}

#[test]
fn max_errors_caps_the_report() {
    let source = "a := ;\nb := ;\nc := ;\nd := ;";
    let options = ParseOptions {
        max_errors: Some(2),
        ..ParseOptions::default()
    };
    let parse = parse_with_options(source, &options);
    let codes: Vec<ErrorCode> = parse.errors().iter().map(|e| e.code).collect();
    assert_eq!(
        codes,
        vec![ErrorCode::E1002, ErrorCode::E1002, ErrorCode::E1010]
    );
    // The tree still covers every statement.
    assert_eq!(error_nodes(parse.tree()).len(), 4);
}

#[test]
fn try_parse_rejects_invalid_utf8() {
    let result = try_parse(b"x := 1;\xff");
    assert_eq!(result, Err(InputError::InvalidUtf8 { valid_up_to: 7 }));
}

#[test]
fn try_parse_accepts_text() {
    let parse = try_parse(b"x := 1;").unwrap();
    assert!(!parse.has_errors());
}

#[test]
fn errors_convert_to_diagnostics() {
    let parse = parse("x := 1\ny := 2;");
    let diagnostic = parse.errors()[0].to_diagnostic();
    assert_eq!(diagnostic.code, ErrorCode::E1008);
    assert!(diagnostic.is_error());
    assert!(!diagnostic.suggestions.is_empty());
}

#[test]
fn empty_input_is_an_empty_file() {
    let parse = parse("");
    assert_eq!(parse.tree().to_sexp(), "(source_file)");
    assert!(parse.errors().is_empty());
}
