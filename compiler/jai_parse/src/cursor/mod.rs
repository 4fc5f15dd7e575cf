//! Token cursor for navigating the token stream.
//!
//! The cursor walks significant tokens only. Extras (whitespace, comments,
//! `@notes` and `#deprecated "…"` groups) are stepped over and handed back
//! in one batch by [`Cursor::take_extras`], which the parser calls right
//! before it places the next node or token in the tree.

use jai_ir::{Span, Token, TokenKind, TokenList};
use tracing::trace;

/// Cursor for navigating tokens.
pub struct Cursor<'a> {
    source: &'a str,
    tokens: &'a [Token],
    /// Index into `tokens` of every significant token.
    significant: Vec<usize>,
    /// Position in `significant`.
    pos: usize,
    /// First token in `tokens` not yet handed out.
    emitted: usize,
    /// Index of the trailing `Eof`; extras never reach past it.
    limit: usize,
    eof: Token,
    previous: Token,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the token stream.
    pub fn new(source: &'a str, tokens: &'a TokenList) -> Self {
        let tokens = tokens.as_slice();
        let mut significant = Vec::with_capacity(tokens.len() / 2 + 1);
        let mut index = 0;
        while index < tokens.len() {
            let token = &tokens[index];
            if token.kind == TokenKind::Eof {
                break;
            }
            if token.kind.is_extra() {
                index += 1;
            } else if is_deprecated(source, token) {
                index += deprecated_group_len(&tokens[index..]);
            } else {
                significant.push(index);
                index += 1;
            }
        }
        let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
        Cursor {
            source,
            tokens,
            significant,
            pos: 0,
            emitted: 0,
            limit: index,
            eof: Token::new(TokenKind::Eof, Span::point(end)),
            previous: Token::new(TokenKind::Eof, Span::point(0)),
        }
    }

    /// Get the current position, counted in significant tokens.
    ///
    /// Used for progress tracking.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the current token. Past the last significant token this is `Eof`.
    #[inline]
    pub fn current(&self) -> Token {
        self.peek_at(0)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Source text of the current token.
    pub fn current_text(&self) -> &'a str {
        self.text(&self.current())
    }

    /// Span of the last consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        self.previous.span
    }

    /// Kind of the last consumed token; `Eof` before the first.
    #[inline]
    pub fn previous_kind(&self) -> TokenKind {
        self.previous.kind
    }

    /// The significant token `n` positions ahead; `peek_at(0)` is current.
    pub fn peek_at(&self, n: usize) -> Token {
        self.significant
            .get(self.pos + n)
            .and_then(|&index| self.tokens.get(index))
            .copied()
            .unwrap_or(self.eof)
    }

    #[inline]
    pub fn peek_kind_at(&self, n: usize) -> TokenKind {
        self.peek_at(n).kind
    }

    pub fn peek_text_at(&self, n: usize) -> &'a str {
        self.text(&self.peek_at(n))
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Is the token `n` ahead the identifier `word`?
    pub fn word_at(&self, n: usize, word: &str) -> bool {
        let token = self.peek_at(n);
        token.kind == TokenKind::Ident && self.text(&token) == word
    }

    /// Is the current token the directive `name` (written with its `#`)?
    pub fn check_directive(&self, name: &str) -> bool {
        self.check(TokenKind::Directive) && self.current_text() == name
    }

    /// Number of tokens spelling `::` at offset `n`: one for the fused
    /// token, two for `:` `:` with trivia between.
    pub fn double_colon_at(&self, n: usize) -> Option<usize> {
        match (self.peek_kind_at(n), self.peek_kind_at(n + 1)) {
            (TokenKind::ColonColon, _) => Some(1),
            (TokenKind::Colon, TokenKind::Colon) => Some(2),
            _ => None,
        }
    }

    /// Hand out the extras sitting before the current token.
    pub fn take_extras(&mut self) -> Extras<'a> {
        let end = self
            .significant
            .get(self.pos)
            .copied()
            .unwrap_or(self.limit);
        let start = self.emitted.min(end);
        self.emitted = end;
        Extras {
            source: self.source,
            tokens: self.tokens.get(start..end).unwrap_or(&[]),
        }
    }

    /// Consume the current token. At end of input this returns `Eof` and
    /// stays put.
    pub fn advance(&mut self) -> Token {
        let Some(&index) = self.significant.get(self.pos) else {
            return self.eof;
        };
        debug_assert_eq!(self.emitted, index, "extras must be taken before advancing");
        let token = self.tokens.get(index).copied().unwrap_or(self.eof);
        trace!(kind = ?token.kind, span = %token.span, "advance");
        self.pos += 1;
        self.emitted = index + 1;
        self.previous = token;
        token
    }

    /// Source text of `token`.
    pub fn text(&self, token: &Token) -> &'a str {
        token.text(self.source)
    }
}

/// Extras between two significant tokens.
pub struct Extras<'a> {
    source: &'a str,
    tokens: &'a [Token],
}

/// One extra: a trivia or note token, or a whole `#deprecated "…"` group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extra<'a> {
    Token(Token),
    Deprecated(&'a [Token]),
}

impl<'a> Iterator for Extras<'a> {
    type Item = Extra<'a>;

    fn next(&mut self) -> Option<Extra<'a>> {
        let first = self.tokens.first()?;
        if is_deprecated(self.source, first) {
            let len = deprecated_group_len(self.tokens);
            let (group, rest) = self.tokens.split_at(len);
            self.tokens = rest;
            Some(Extra::Deprecated(group))
        } else {
            let token = *first;
            self.tokens = &self.tokens[1..];
            Some(Extra::Token(token))
        }
    }
}

fn is_deprecated(source: &str, token: &Token) -> bool {
    token.kind == TokenKind::Directive && token.text(source) == "#deprecated"
}

/// Length of the `#deprecated` group at the start of `tokens`: the
/// directive, then trivia and a string literal if one follows.
fn deprecated_group_len(tokens: &[Token]) -> usize {
    let mut end = 1;
    while tokens.get(end).is_some_and(|t| t.kind.is_extra()) {
        end += 1;
    }
    match tokens.get(end).map(|t| t.kind) {
        Some(TokenKind::Quote) => {
            end += 1;
            while tokens.get(end).is_some_and(|t| {
                matches!(t.kind, TokenKind::StringContent | TokenKind::EscapeSequence)
            }) {
                end += 1;
            }
            if tokens.get(end).is_some_and(|t| t.kind == TokenKind::Quote) {
                end += 1;
            }
            end
        }
        // Unterminated string: the lexer folded it into one token.
        Some(TokenKind::Error) => end + 1,
        _ => 1,
    }
}
