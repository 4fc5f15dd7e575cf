//! Jai IR - syntax data types shared by the lexer and the parser.
//!
//! This crate contains:
//! - Spans for source locations
//! - Tokens and `TokenList` for lexer output
//! - The node taxonomy (`SyntaxKind`, `FieldName`) with supertype groupings
//! - The owned concrete syntax tree (`SyntaxNode`)
//!
//! Everything here is plain owned data: `Clone + Eq + Hash + Send + Sync`,
//! so a finished tree can be handed across threads without synchronization.
//!
//! Floats are stored as `u64` bits so token payloads stay `Eq + Hash`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod kind;
mod span;
mod token;
mod tree;

pub use kind::{FieldName, Supertype, SyntaxKind, TAXONOMY_VERSION};
pub use span::{Span, SpanError};
pub use token::{FloatLit, IntLit, NumBase, Token, TokenKind, TokenList, TokenValue};
pub use tree::{Child, Descendants, SyntaxElement, SyntaxNode};
