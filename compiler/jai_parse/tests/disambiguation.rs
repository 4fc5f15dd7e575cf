//! Look-alike constructs resolved by position and by the declared conflicts.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use jai_ir::{FieldName, SyntaxKind, SyntaxNode};
use jai_parse::parse;
use pretty_assertions::assert_eq;

/// The single top-level node of a clean parse.
fn only_statement(source: &str) -> SyntaxNode {
    let parse = parse(source);
    assert!(parse.errors().is_empty(), "{source}: {:?}", parse.errors());
    let nodes: Vec<&SyntaxNode> = parse.tree().child_nodes().collect();
    assert_eq!(nodes.len(), 1, "{}", parse.tree().to_sexp());
    nodes[0].clone()
}

fn field_kind(node: &SyntaxNode, field: FieldName) -> SyntaxKind {
    node.field_node(field)
        .map(SyntaxNode::kind)
        .unwrap_or_else(|| panic!("no {field} in {}", node.to_sexp()))
}

#[test]
fn call_shape_in_type_position_is_a_parameterized_type() {
    let decl = only_statement("x : Vector2(f32);");
    assert_eq!(decl.kind(), SyntaxKind::VariableDeclaration);
    assert_eq!(
        field_kind(&decl, FieldName::Type),
        SyntaxKind::ParameterizedStructType
    );
    assert!(decl.find(SyntaxKind::CallExpression).is_none());
}

#[test]
fn call_shape_in_value_position_is_a_call() {
    let decl = only_statement("x := Vector2(f32);");
    assert_eq!(field_kind(&decl, FieldName::Value), SyntaxKind::CallExpression);
}

#[test]
fn call_shape_before_literal_body_is_a_type() {
    let source = "x := Vector2(f32).{1, 2};";
    let decl = only_statement(source);
    let literal = decl.field_node(FieldName::Value).unwrap();
    assert_eq!(literal.kind(), SyntaxKind::StructLiteral);

    let ty = literal.field_node(FieldName::Type).unwrap();
    assert_eq!(ty.kind(), SyntaxKind::ParameterizedStructType);
    assert_eq!(ty.text(source), "Vector2(f32)");
    assert_eq!(literal.fields(FieldName::Element).count(), 2);
}

#[test]
fn star_between_operands_is_multiplication() {
    let decl = only_statement("y := a.b * c;");
    let value = decl.field_node(FieldName::Value).unwrap();
    assert_eq!(value.kind(), SyntaxKind::BinaryExpression);
    assert_eq!(field_kind(value, FieldName::Left), SyntaxKind::MemberExpression);
    assert!(decl.find(SyntaxKind::DereferenceExpression).is_none());
}

#[test]
fn trailing_star_is_dereference() {
    let decl = only_statement("y := a.b*;");
    let value = decl.field_node(FieldName::Value).unwrap();
    assert_eq!(value.kind(), SyntaxKind::DereferenceExpression);
    assert_eq!(
        field_kind(value, FieldName::Argument),
        SyntaxKind::MemberExpression
    );
}

#[test]
fn trailing_star_before_closing_paren_is_dereference() {
    let decl = only_statement("y := f(a.b*);");
    assert!(decl.find(SyntaxKind::DereferenceExpression).is_some());
    assert!(decl.find(SyntaxKind::BinaryExpression).is_none());
}

#[test]
fn prefix_star_is_pointer_type_or_address() {
    let ty = only_statement("p : *int;");
    assert_eq!(field_kind(&ty, FieldName::Type), SyntaxKind::PointerType);

    let value = only_statement("p := *x;");
    assert_eq!(field_kind(&value, FieldName::Value), SyntaxKind::Address);
}

#[test]
fn dotted_name_is_member_or_qualified_type() {
    let value = only_statement("v := a.b;");
    assert_eq!(field_kind(&value, FieldName::Value), SyntaxKind::MemberExpression);

    let ty = only_statement("v : a.b;");
    assert_eq!(field_kind(&ty, FieldName::Type), SyntaxKind::QualifiedType);
}

#[test]
fn struct_declaration_wins_over_anonymous_struct() {
    let decl = only_statement("Node :: struct { next: *Node; }");
    assert_eq!(decl.kind(), SyntaxKind::StructDeclaration);
    assert!(decl.find(SyntaxKind::AnonymousStructType).is_none());
}

#[test]
fn enum_declaration_wins_over_constant() {
    let decl = only_statement("Mode :: enum { A; B; }");
    assert_eq!(decl.kind(), SyntaxKind::EnumDeclaration);
}

#[test]
fn anonymous_struct_in_type_position() {
    let decl = only_statement("p : struct { x: int; };");
    assert_eq!(
        field_kind(&decl, FieldName::Type),
        SyntaxKind::AnonymousStructType
    );
}

#[test]
fn procedure_with_body_is_a_declaration() {
    let decl = only_statement("f :: (x: int) -> int { return x; }");
    assert_eq!(decl.kind(), SyntaxKind::ProcedureDeclaration);
}

#[test]
fn procedure_without_body_is_a_type() {
    let decl = only_statement("F :: (x: int) -> int;");
    assert_eq!(decl.kind(), SyntaxKind::ConstDeclaration);
    assert_eq!(field_kind(&decl, FieldName::Value), SyntaxKind::ProcedureType);
}

#[test]
fn parenthesized_expression_is_not_a_procedure() {
    let decl = only_statement("x := (a + b) * 2;");
    let value = decl.field_node(FieldName::Value).unwrap();
    assert_eq!(value.kind(), SyntaxKind::BinaryExpression);
    assert_eq!(
        field_kind(value, FieldName::Left),
        SyntaxKind::ParenthesizedExpression
    );
}

#[test]
fn equality_followed_by_brace_is_if_case() {
    let switch = only_statement("if x == { case 1; }");
    assert_eq!(switch.kind(), SyntaxKind::IfCaseStatement);

    let plain = only_statement("if x == y { }");
    assert_eq!(plain.kind(), SyntaxKind::IfStatement);
}
