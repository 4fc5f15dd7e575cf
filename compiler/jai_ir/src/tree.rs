//! Owned concrete syntax tree.
//!
//! Every token of the input, trivia included, is a leaf somewhere in the tree,
//! so walking the leaves in order reproduces the source text exactly.

use std::fmt::Write as _;

use crate::{FieldName, Span, SyntaxKind, Token, TokenKind};

/// A node or a token in child position.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(Token),
}

impl SyntaxElement {
    pub fn span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.span,
            SyntaxElement::Token(token) => token.span,
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }

    /// Kind of the child node, if this is a node.
    pub fn node_kind(&self) -> Option<SyntaxKind> {
        self.as_node().map(SyntaxNode::kind)
    }
}

/// A child together with the field it was recorded under.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Child {
    pub field: Option<FieldName>,
    pub element: SyntaxElement,
}

/// Interior node of the syntax tree.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxNode {
    kind: SyntaxKind,
    span: Span,
    children: Vec<Child>,
}

impl SyntaxNode {
    /// Build a node whose span is the union of its children's spans.
    ///
    /// `at` positions a node with no children.
    pub fn new(kind: SyntaxKind, children: Vec<Child>, at: u32) -> Self {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.element.span().merge(last.element.span()),
            _ => Span::point(at),
        };
        SyntaxNode {
            kind,
            span,
            children,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    #[inline]
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Direct child nodes, skipping tokens.
    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(|c| c.element.as_node())
    }

    /// Direct child tokens, skipping nodes.
    pub fn child_tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(|c| c.element.as_token())
    }

    /// First child recorded under `field`.
    pub fn field(&self, field: FieldName) -> Option<&SyntaxElement> {
        self.fields(field).next()
    }

    /// First child node recorded under `field`.
    pub fn field_node(&self, field: FieldName) -> Option<&SyntaxNode> {
        self.fields(field).find_map(SyntaxElement::as_node)
    }

    /// Every child recorded under `field`, in source order.
    pub fn fields(&self, field: FieldName) -> impl Iterator<Item = &SyntaxElement> {
        self.children
            .iter()
            .filter(move |c| c.field == Some(field))
            .map(|c| &c.element)
    }

    /// Pre-order walk over this node and all descendant nodes.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First descendant (or self) of the given kind.
    pub fn find(&self, kind: SyntaxKind) -> Option<&SyntaxNode> {
        self.descendants().find(|n| n.kind == kind)
    }

    /// All leaf tokens in source order.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for child in &self.children {
            match &child.element {
                SyntaxElement::Node(node) => node.collect_leaves(out),
                SyntaxElement::Token(token) => out.push(token),
            }
        }
    }

    /// Concatenated text of all leaves.
    pub fn text(&self, source: &str) -> String {
        let mut out = String::with_capacity(self.span.len() as usize);
        for token in self.leaves() {
            out.push_str(token.text(source));
        }
        out
    }

    /// Does this subtree contain an error node or an error token?
    pub fn has_error(&self) -> bool {
        self.descendants().any(|n| {
            n.kind == SyntaxKind::Error || n.child_tokens().any(|t| t.kind == TokenKind::Error)
        })
    }

    /// S-expression rendering with named nodes, named leaves and fields.
    ///
    /// Anonymous tokens (punctuation, keywords, whitespace) are omitted, and
    /// so is the name token inside `identifier` and `builtin_type`.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out);
        out
    }

    fn write_sexp(&self, out: &mut String) {
        out.push('(');
        out.push_str(self.kind.name());
        for child in &self.children {
            match &child.element {
                SyntaxElement::Node(node) => {
                    write_field_prefix(out, child.field);
                    node.write_sexp(out);
                }
                SyntaxElement::Token(token) => {
                    if self.kind.is_name_leaf() {
                        continue;
                    }
                    if let Some(name) = token.kind.leaf_name() {
                        write_field_prefix(out, child.field);
                        let _ = write!(out, "({name})");
                    }
                }
            }
        }
        out.push(')');
    }

    /// Take the children out, for rebuilding the node under another kind.
    pub fn into_children(self) -> Vec<Child> {
        self.children
    }

    /// Reinterpret this node as a different kind, keeping children and span.
    #[must_use]
    pub fn relabeled(mut self, kind: SyntaxKind) -> Self {
        self.kind = kind;
        self
    }
}

fn write_field_prefix(out: &mut String, field: Option<FieldName>) {
    out.push(' ');
    if let Some(field) = field {
        let _ = write!(out, "{field}: ");
    }
}

/// Iterator returned by [`SyntaxNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<&'a SyntaxNode> {
        let node = self.stack.pop()?;
        self.stack.extend(node.child_nodes().collect::<Vec<_>>().into_iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests;
