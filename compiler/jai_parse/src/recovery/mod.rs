//! Error recovery for the parser.
//!
//! When a statement fails to parse, everything it consumed becomes an
//! `ERROR` node and the parser skips ahead to a synchronization point:
//! just past the next `;`, right before a `}` or the end of input, or (when
//! enabled) right before the next top-level declaration. Bracketed groups
//! are skipped whole, so a `;` inside a call argument list does not end the
//! error.

use jai_ir::{SyntaxKind, TokenKind};
use tracing::debug;

use crate::builder::Checkpoint;
use crate::{Parser, SyntaxError};

// TokenSet uses a u128 bitset, so all discriminant indices must fit in 0..127.
const _: () = assert!(
    TokenKind::COUNT <= 128,
    "TokenSet uses u128 bitset; all discriminant indices must be < 128"
);

/// A set of token kinds using bitset representation for O(1) membership testing.
///
/// Each bit in the u128 corresponds to a `TokenKind` discriminant index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    /// Create an empty token set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a token kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.discriminant_index()))
    }

    /// Union of two token sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u128 << kind.discriminant_index())) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate over the kinds in this set, in discriminant order.
    pub fn iter(&self) -> impl Iterator<Item = TokenKind> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = u8::try_from(bits.trailing_zeros()).ok()?;
            bits &= bits - 1;
            TokenKind::from_discriminant_index(index)
        })
    }

    /// Format this token set as a human-readable list for error messages.
    ///
    /// Returns a string like "`,`, `)`, or `}`" for multiple tokens,
    /// or "`(`" for a single token, or "nothing" for empty set.
    pub fn format_expected(&self) -> String {
        let names: Vec<&'static str> = self.iter().map(TokenKind::display_name).collect();

        match names.as_slice() {
            [] => "nothing".to_string(),
            [single] => format!("`{single}`"),
            [first, second] => format!("`{first}` or `{second}`"),
            [rest @ .., last] => {
                let rest_str = rest
                    .iter()
                    .map(|n| format!("`{n}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{rest_str}, or `{last}`")
            }
        }
    }
}

pub const OPEN_DELIMITERS: TokenSet = TokenSet::new()
    .with(TokenKind::LParen)
    .with(TokenKind::LBracket)
    .with(TokenKind::LBrace);

pub const CLOSE_DELIMITERS: TokenSet = TokenSet::new()
    .with(TokenKind::RParen)
    .with(TokenKind::RBracket)
    .with(TokenKind::RBrace);

/// Tokens a failed statement is never allowed to swallow.
pub const STATEMENT_BOUNDARY: TokenSet = TokenSet::new()
    .with(TokenKind::RBrace)
    .with(TokenKind::Eof);

impl Parser<'_> {
    /// Turn everything parsed since `checkpoint` into an `ERROR` node,
    /// skip to the next synchronization point and record `error`.
    ///
    /// `depth` is the builder depth at the checkpoint: nodes opened since
    /// then are dissolved into the error. `start` is the cursor position at
    /// the checkpoint, used to guarantee progress.
    pub(crate) fn recover(
        &mut self,
        checkpoint: Checkpoint,
        depth: usize,
        start: usize,
        error: SyntaxError,
    ) {
        self.builder.dissolve_to(depth);
        self.builder.start_at(checkpoint, SyntaxKind::Error);
        self.builder.clear_fields();
        if self.cursor.position() == start && !self.is_at_end() && !self.check(TokenKind::Semicolon)
        {
            self.skip_one();
        }
        self.synchronize();
        self.builder.finish();
        debug!(code = %error.code, span = %error.span, "recovered");
        self.error(error);
    }

    /// Wrap the current token (and whatever follows up to the next
    /// synchronization point) in an `ERROR` node.
    pub(crate) fn skip_as_error(&mut self, error: SyntaxError) {
        let checkpoint = self.checkpoint();
        let depth = self.builder.depth();
        let start = self.cursor.position();
        self.recover(checkpoint, depth, start, error);
    }

    fn synchronize(&mut self) {
        loop {
            let kind = self.current_kind();
            if STATEMENT_BOUNDARY.contains(kind) {
                return;
            }
            if kind == TokenKind::Semicolon {
                self.bump();
                return;
            }
            if self.options.resync_on_declaration && self.at_declaration_boundary() {
                return;
            }
            self.skip_one();
        }
    }

    /// Consume one token, or a whole bracketed group when at an opener.
    fn skip_one(&mut self) {
        if !OPEN_DELIMITERS.contains(self.current_kind()) {
            self.bump();
            return;
        }
        let mut depth = 0usize;
        loop {
            let kind = self.current_kind();
            if kind == TokenKind::Eof {
                return;
            }
            if OPEN_DELIMITERS.contains(kind) {
                depth += 1;
            } else if CLOSE_DELIMITERS.contains(kind) {
                depth = depth.saturating_sub(1);
            }
            self.bump();
            if depth == 0 {
                return;
            }
        }
    }

    /// `name ::`, `#import`, `#load` or `#run` at the current token.
    fn at_declaration_boundary(&self) -> bool {
        match self.current_kind() {
            TokenKind::Ident => self.cursor.double_colon_at(1).is_some(),
            TokenKind::Directive => {
                matches!(self.current_text(), "#import" | "#load" | "#run")
            }
            _ => false,
        }
    }
}
