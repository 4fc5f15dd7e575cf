use pretty_assertions::assert_eq;

use super::*;

fn tok(kind: TokenKind, start: u32, end: u32) -> Child {
    Child {
        field: None,
        element: SyntaxElement::Token(Token::new(kind, Span::new(start, end))),
    }
}

fn with_field(mut child: Child, field: FieldName) -> Child {
    child.field = Some(field);
    child
}

fn node(kind: SyntaxKind, children: Vec<Child>) -> Child {
    Child {
        field: None,
        element: SyntaxElement::Node(SyntaxNode::new(kind, children, 0)),
    }
}

/// `x := 1;`
fn sample() -> SyntaxNode {
    let decl = node(
        SyntaxKind::VariableDeclaration,
        vec![
            with_field(tok(TokenKind::Ident, 0, 1), FieldName::Name),
            tok(TokenKind::Whitespace, 1, 2),
            tok(TokenKind::Colon, 2, 3),
            tok(TokenKind::Eq, 3, 4),
            tok(TokenKind::Whitespace, 4, 5),
            with_field(
                node(SyntaxKind::Integer, vec![tok(TokenKind::Int, 5, 6)]),
                FieldName::Value,
            ),
        ],
    );
    SyntaxNode::new(
        SyntaxKind::SourceFile,
        vec![decl, tok(TokenKind::Semicolon, 6, 7)],
        0,
    )
}

#[test]
fn span_is_union_of_children() {
    let tree = sample();
    assert_eq!(tree.span(), Span::new(0, 7));
    let decl = tree.child_nodes().next().map(SyntaxNode::span);
    assert_eq!(decl, Some(Span::new(0, 6)));
}

#[test]
fn empty_node_is_positioned() {
    let empty = SyntaxNode::new(SyntaxKind::Block, Vec::new(), 12);
    assert_eq!(empty.span(), Span::point(12));
}

#[test]
fn leaves_reproduce_text() {
    let source = "x := 1;";
    assert_eq!(sample().text(source), source);
}

#[test]
fn field_lookup() {
    let tree = sample();
    let Some(decl) = tree.find(SyntaxKind::VariableDeclaration) else {
        panic!("missing declaration");
    };
    let value = decl.field_node(FieldName::Value).map(SyntaxNode::kind);
    assert_eq!(value, Some(SyntaxKind::Integer));
    let name = decl.field(FieldName::Name).and_then(SyntaxElement::as_token);
    assert_eq!(name.map(|t| t.kind), Some(TokenKind::Ident));
    assert!(decl.field(FieldName::Type).is_none());
}

#[test]
fn sexp_omits_anonymous_tokens() {
    assert_eq!(
        sample().to_sexp(),
        "(source_file (variable_declaration name: (identifier) value: (integer)))"
    );
}

#[test]
fn sexp_hides_the_token_of_a_builtin_type() {
    let decl = node(
        SyntaxKind::VariableDeclaration,
        vec![
            with_field(tok(TokenKind::Ident, 0, 1), FieldName::Name),
            tok(TokenKind::Colon, 2, 3),
            with_field(
                node(SyntaxKind::BuiltinType, vec![tok(TokenKind::Ident, 4, 7)]),
                FieldName::Type,
            ),
        ],
    );
    let file = SyntaxNode::new(SyntaxKind::SourceFile, vec![decl], 0);
    assert_eq!(
        file.to_sexp(),
        "(source_file (variable_declaration name: (identifier) type: (builtin_type)))"
    );
}

#[test]
fn descendants_are_preorder() {
    let kinds: Vec<_> = sample().descendants().map(SyntaxNode::kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::SourceFile,
            SyntaxKind::VariableDeclaration,
            SyntaxKind::Integer
        ]
    );
}

#[test]
fn has_error_sees_error_tokens() {
    assert!(!sample().has_error());
    let bad = SyntaxNode::new(
        SyntaxKind::SourceFile,
        vec![tok(TokenKind::Error, 0, 1)],
        0,
    );
    assert!(bad.has_error());
}

#[test]
fn relabel_keeps_span() {
    let tree = sample().relabeled(SyntaxKind::Block);
    assert_eq!(tree.kind(), SyntaxKind::Block);
    assert_eq!(tree.span(), Span::new(0, 7));
}

#[test]
fn identifier_node_prints_once() {
    let expr = node(SyntaxKind::Identifier, vec![tok(TokenKind::Ident, 0, 1)]);
    let root = SyntaxNode::new(SyntaxKind::SourceFile, vec![expr], 0);
    assert_eq!(root.to_sexp(), "(source_file (identifier))");
}
