//! Tree construction.
//!
//! Nodes are built on a stack of open frames. A [`Checkpoint`] remembers a
//! position in the innermost frame so a node can be opened retroactively
//! around children that were already pushed; that is how a left operand ends
//! up inside the binary expression that follows it, and how a declaration
//! learns its kind only after its names and `::` were consumed.

use jai_ir::{Child, FieldName, SyntaxElement, SyntaxKind, SyntaxNode, Token, TokenKind};

struct Frame {
    kind: SyntaxKind,
    at: u32,
    children: Vec<Child>,
}

impl Frame {
    fn new(kind: SyntaxKind, at: u32) -> Self {
        Frame {
            kind,
            at,
            children: Vec::new(),
        }
    }

    fn into_node(self) -> SyntaxNode {
        SyntaxNode::new(self.kind, self.children, self.at)
    }

    /// Index of the last child that is not an extra.
    fn last_significant(&self) -> Option<usize> {
        self.children.iter().rposition(is_significant)
    }
}

/// A saved position in the innermost open node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    depth: usize,
    index: usize,
    at: u32,
}

pub(crate) struct TreeBuilder {
    root: Frame,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    pub(crate) fn new(root: SyntaxKind) -> Self {
        TreeBuilder {
            root: Frame::new(root, 0),
            stack: Vec::new(),
        }
    }

    /// Number of open nodes above the root.
    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    fn top(&mut self) -> &mut Frame {
        match self.stack.last_mut() {
            Some(frame) => frame,
            None => &mut self.root,
        }
    }

    fn top_ref(&self) -> &Frame {
        self.stack.last().unwrap_or(&self.root)
    }

    pub(crate) fn start(&mut self, kind: SyntaxKind, at: u32) {
        self.stack.push(Frame::new(kind, at));
    }

    /// Close the innermost open node and attach it to its parent.
    pub(crate) fn finish(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let node = frame.into_node();
        self.node(node);
    }

    pub(crate) fn token(&mut self, token: Token) {
        self.top().children.push(Child {
            field: None,
            element: SyntaxElement::Token(token),
        });
    }

    /// Attach an already built node.
    pub(crate) fn node(&mut self, node: SyntaxNode) {
        self.top().children.push(Child {
            field: None,
            element: SyntaxElement::Node(node),
        });
    }

    pub(crate) fn checkpoint(&mut self, at: u32) -> Checkpoint {
        Checkpoint {
            depth: self.stack.len(),
            index: self.top().children.len(),
            at,
        }
    }

    /// Open a node of `kind` holding everything pushed since `checkpoint`.
    pub(crate) fn start_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        debug_assert_eq!(
            checkpoint.depth,
            self.stack.len(),
            "checkpoint taken in a different node"
        );
        let frame = self.top();
        let index = checkpoint.index.min(frame.children.len());
        let children = frame.children.split_off(index);
        let at = children
            .first()
            .map_or(checkpoint.at, |child| child.element.span().start);
        self.stack.push(Frame { kind, at, children });
    }

    /// Record the last significant child of the innermost node under `field`.
    pub(crate) fn tag_last(&mut self, field: FieldName) {
        let frame = self.top();
        if let Some(index) = frame.last_significant() {
            frame.children[index].field = Some(field);
        }
    }

    /// Drop the field labels of the innermost node's children.
    pub(crate) fn clear_fields(&mut self) {
        for child in &mut self.top().children {
            child.field = None;
        }
    }

    /// Kind of the last significant child, if it is a node.
    pub(crate) fn last_node_kind(&self) -> Option<SyntaxKind> {
        let frame = self.top_ref();
        frame
            .last_significant()
            .and_then(|index| frame.children[index].element.node_kind())
    }

    /// Rewrite the last significant child node in place.
    pub(crate) fn map_last_node(&mut self, f: impl FnOnce(SyntaxNode) -> SyntaxNode) {
        let frame = self.top();
        let Some(index) = frame.last_significant() else {
            return;
        };
        if let SyntaxElement::Node(node) = &mut frame.children[index].element {
            let placeholder = SyntaxNode::new(SyntaxKind::Error, Vec::new(), node.span().start);
            let taken = std::mem::replace(node, placeholder);
            *node = f(taken);
        }
    }

    /// Replace the last significant child node with a list of children.
    pub(crate) fn splice_last_node(&mut self, f: impl FnOnce(SyntaxNode) -> Vec<Child>) {
        let frame = self.top();
        let Some(index) = frame.last_significant() else {
            return;
        };
        let child = frame.children.remove(index);
        match child.element {
            SyntaxElement::Node(node) => {
                frame.children.splice(index..index, f(node));
            }
            element => frame.children.insert(
                index,
                Child {
                    field: child.field,
                    element,
                },
            ),
        }
    }

    /// Close every node above `depth` without keeping it: its children
    /// move up into the parent. Used when a half-built construct turns out
    /// to be an error.
    pub(crate) fn dissolve_to(&mut self, depth: usize) {
        while self.stack.len() > depth {
            let Some(frame) = self.stack.pop() else {
                break;
            };
            self.top().children.extend(frame.children);
        }
    }

    pub(crate) fn finish_root(mut self) -> SyntaxNode {
        self.dissolve_to(0);
        self.root.into_node()
    }
}

fn is_significant(child: &Child) -> bool {
    match &child.element {
        SyntaxElement::Token(token) => !token.kind.is_extra(),
        SyntaxElement::Node(node) => node.kind() != SyntaxKind::DeprecatedDirective,
    }
}

/// Build the node for a `#deprecated` group: the directive, trivia, and the
/// message string if there is one.
pub(crate) fn deprecated_directive(group: &[Token]) -> SyntaxNode {
    let at = group.first().map_or(0, |token| token.span.start);
    let mut children = Vec::with_capacity(group.len());
    let mut string: Option<Vec<Child>> = None;
    for &token in group {
        let child = Child {
            field: None,
            element: SyntaxElement::Token(token),
        };
        match (string.take(), token.kind) {
            (None, TokenKind::Quote) => string = Some(vec![child]),
            (Some(mut parts), TokenKind::Quote) => {
                parts.push(child);
                let start = parts.first().map_or(at, |c| c.element.span().start);
                children.push(Child {
                    field: Some(FieldName::Message),
                    element: SyntaxElement::Node(SyntaxNode::new(
                        SyntaxKind::String,
                        parts,
                        start,
                    )),
                });
            }
            (Some(mut parts), _) => {
                parts.push(child);
                string = Some(parts);
            }
            (None, _) => children.push(child),
        }
    }
    if let Some(parts) = string {
        children.extend(parts);
    }
    SyntaxNode::new(SyntaxKind::DeprecatedDirective, children, at)
}
