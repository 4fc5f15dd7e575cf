//! Lexer for Jai.
//!
//! The regular token table is a `logos` automaton ([`raw_token`]). Comments,
//! string bodies and `#string` heredocs need state the automaton cannot
//! carry, so the driver below hands them to the scanners in `jai_lexer_core`
//! and bumps the automaton past what they consumed.
//!
//! Every byte of input ends up in exactly one token. Trivia (whitespace and
//! comments) is kept, and malformed input becomes `Error` tokens plus a
//! [`LexError`], never a gap.

mod cooker;
mod lex_error;
mod raw_token;

use jai_ir::{NumBase, Span, Token, TokenKind, TokenList, TokenValue};
use jai_lexer_core::{
    block_comment, heredoc_body, heredoc_delimiter, line_comment, string_piece, BlockCommentEnd,
    Cursor, SourceBuffer, StringPiece,
};
use logos::{Lexer, Logos};
use tracing::debug;

pub use lex_error::{LexError, LexErrorKind};

use raw_token::{NumShape, RawToken};

/// Result of lexing one source unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOutput {
    /// All tokens, trivia included, terminated by `Eof`.
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

/// Lex source code into a `TokenList`.
///
/// Never fails: bad input produces `Error` tokens and entries in
/// [`LexOutput::errors`].
pub fn lex(source: &str) -> LexOutput {
    let _span = tracing::debug_span!("lex", bytes = source.len()).entered();

    let buffer = SourceBuffer::new(source);
    let mut driver = Driver {
        source,
        buffer: &buffer,
        tokens: TokenList::with_capacity(source.len() / 3 + 1),
        errors: Vec::new(),
    };
    let mut raw = RawToken::lexer(source);

    while let Some(result) = raw.next() {
        let span = to_span(raw.span());
        match result {
            Ok(RawToken::LineCommentOpen) => driver.line_comment(&mut raw, span),
            Ok(RawToken::BlockCommentOpen) => driver.block_comment(&mut raw, span),
            Ok(RawToken::Quote) => driver.string(&mut raw, span),
            Ok(RawToken::Directive) if raw.slice() == "#string" => {
                driver.push(TokenKind::Directive, span);
                driver.heredoc(&mut raw, span);
            }
            Ok(token) => driver.simple(token, raw.slice(), span),
            Err(()) => driver.invalid(raw.slice(), span),
        }
    }

    driver.push(TokenKind::Eof, Span::point(to_u32(source.len())));
    debug!(
        tokens = driver.tokens.len(),
        errors = driver.errors.len(),
        "lexed"
    );
    LexOutput {
        tokens: driver.tokens,
        errors: driver.errors,
    }
}

/// Text of a heredoc, given the span of its `HeredocBody` token.
///
/// Drops the rest of the opening line, the line break before the closing
/// delimiter and that line's indentation.
pub fn heredoc_text(source: &str, body: Span) -> &str {
    let text = body.text(source);
    let Some((_, rest)) = text.split_once('\n') else {
        return "";
    };
    let rest = rest.trim_end_matches([' ', '\t']);
    let rest = rest.strip_suffix('\n').unwrap_or(rest);
    rest.strip_suffix('\r').unwrap_or(rest)
}

fn to_u32(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}

/// Offsets past `u32::MAX` saturate; `jai_parse` refuses such inputs first.
fn to_span(range: std::ops::Range<usize>) -> Span {
    let (start, end) = (range.start, range.end);
    Span::try_from_range(range).unwrap_or_else(|_| Span::new(to_u32(start), to_u32(end)))
}

struct Driver<'src> {
    source: &'src str,
    buffer: &'src SourceBuffer,
    tokens: TokenList,
    errors: Vec<LexError>,
}

impl<'src> Driver<'src> {
    fn push(&mut self, kind: TokenKind, span: Span) {
        self.tokens.push(Token::new(kind, span));
    }

    fn error(&mut self, span: Span, kind: LexErrorKind) {
        debug!(%span, %kind, "lex error");
        self.errors.push(LexError::new(span, kind));
    }

    fn text(&self, span: Span) -> &'src str {
        span.text(self.source)
    }

    fn cursor_at(&self, offset: u32) -> Cursor<'src> {
        self.buffer.cursor_at(offset)
    }

    /// Move the automaton up to `end`, which a sub-scanner reached.
    fn sync(raw: &mut Lexer<'src, RawToken>, end: u32) {
        let consumed = raw.span().end;
        let end = end as usize;
        if end > consumed {
            raw.bump(end - consumed);
        }
    }

    fn simple(&mut self, token: RawToken, text: &str, span: Span) {
        if let Some(kind) = token.simple_kind() {
            self.push(kind, span);
            return;
        }

        let (kind, value, error) = match token {
            RawToken::Decimal(NumShape::Int) => int(cooker::cook_int(text, NumBase::Decimal)),
            RawToken::Decimal(NumShape::Float) => float(cooker::cook_decimal_float(text)),
            RawToken::BinInt => int(cooker::cook_int(text, NumBase::Binary)),
            RawToken::OctInt => int(cooker::cook_int(text, NumBase::Octal)),
            RawToken::Hex(NumShape::Int) => int(cooker::cook_int(text, NumBase::Hex)),
            RawToken::FloatBits(NumShape::Int) => float(cooker::cook_float_bits(text)),
            RawToken::Hex(NumShape::Float) | RawToken::FloatBits(NumShape::Float) => {
                float(cooker::cook_hex_float(text))
            }
            // Openers are routed before reaching here.
            _ => (TokenKind::Error, TokenValue::None, None),
        };
        self.tokens.push(Token::new(kind, span).with_value(value));
        if let Some(error) = error {
            self.error(span, error);
        }
    }

    fn invalid(&mut self, text: &str, span: Span) {
        self.push(TokenKind::Error, span);
        let ch = text.chars().next().unwrap_or('\u{fffd}');
        self.error(span, LexErrorKind::InvalidCharacter { ch });
    }

    fn line_comment(&mut self, raw: &mut Lexer<'src, RawToken>, open: Span) {
        let mut cursor = self.cursor_at(open.start);
        line_comment(&mut cursor);
        Self::sync(raw, cursor.pos());
        self.push(TokenKind::LineComment, Span::new(open.start, cursor.pos()));
    }

    fn block_comment(&mut self, raw: &mut Lexer<'src, RawToken>, open: Span) {
        let mut cursor = self.cursor_at(open.start);
        let end = block_comment(&mut cursor);
        Self::sync(raw, cursor.pos());
        let span = Span::new(open.start, cursor.pos());
        match end {
            BlockCommentEnd::Terminated => self.push(TokenKind::BlockComment, span),
            BlockCommentEnd::Unterminated { depth } => {
                self.push(TokenKind::Error, span);
                self.error(span, LexErrorKind::UnterminatedBlockComment { depth });
            }
        }
    }

    /// Quote, body pieces, quote. An unterminated literal collapses into a
    /// single `Error` token from the opening quote to end of input.
    fn string(&mut self, raw: &mut Lexer<'src, RawToken>, open: Span) {
        let token_mark = self.tokens.len();
        let error_mark = self.errors.len();
        self.push(TokenKind::Quote, open);

        let mut cursor = self.cursor_at(open.end);
        loop {
            let start = cursor.pos();
            let piece = string_piece(&mut cursor);
            let span = Span::new(start, cursor.pos());
            match piece {
                StringPiece::Content | StringPiece::LineBreak => {
                    self.push(TokenKind::StringContent, span);
                }
                StringPiece::Escape(form) => {
                    let value = match cooker::cook_escape(self.text(span), form) {
                        Ok(c) => c,
                        Err(error) => {
                            self.error(span, error);
                            '\u{fffd}'
                        }
                    };
                    self.tokens.push(
                        Token::new(TokenKind::EscapeSequence, span)
                            .with_value(TokenValue::Char(value)),
                    );
                }
                StringPiece::Close => {
                    self.push(TokenKind::Quote, span);
                    break;
                }
                StringPiece::Eof => {
                    self.tokens.truncate(token_mark);
                    self.errors.truncate(error_mark);
                    let span = Span::new(open.start, cursor.pos());
                    self.push(TokenKind::Error, span);
                    self.error(span, LexErrorKind::UnterminatedString);
                    break;
                }
            }
        }
        Self::sync(raw, cursor.pos());
    }

    /// `#string DELIM` body `DELIM`. The directive token is already pushed.
    fn heredoc(&mut self, raw: &mut Lexer<'src, RawToken>, directive: Span) {
        let mut cursor = self.cursor_at(directive.end);
        let Some(delimiter) = heredoc_delimiter(&mut cursor) else {
            // Leave whatever follows to the automaton.
            self.error(directive, LexErrorKind::MissingHeredocDelimiter);
            return;
        };
        if delimiter.start > directive.end {
            self.push(TokenKind::Whitespace, Span::new(directive.end, delimiter.start));
        }
        let delimiter_span = Span::new(delimiter.start, delimiter.end);
        self.push(TokenKind::HeredocStart, delimiter_span);

        let delimiter_text = self.text(delimiter_span);
        let body = heredoc_body(&mut cursor, delimiter_text.as_bytes());
        let body_span = Span::new(delimiter.end, cursor.pos());

        if body.terminated {
            if !body_span.is_empty() {
                self.push(TokenKind::HeredocBody, body_span);
            }
            let end = cursor.pos() + delimiter_span.len();
            self.push(TokenKind::HeredocEnd, Span::new(cursor.pos(), end));
            Self::sync(raw, end);
        } else {
            if !body_span.is_empty() {
                self.push(TokenKind::Error, body_span);
            }
            self.error(
                Span::new(delimiter.start, cursor.pos()),
                LexErrorKind::UnterminatedHeredoc {
                    delimiter: delimiter_text.to_owned(),
                },
            );
            Self::sync(raw, cursor.pos());
        }
    }
}

fn int(
    (lit, error): (jai_ir::IntLit, Option<LexErrorKind>),
) -> (TokenKind, TokenValue, Option<LexErrorKind>) {
    (TokenKind::Int, TokenValue::Int(lit), error)
}

fn float(
    (lit, error): (jai_ir::FloatLit, Option<LexErrorKind>),
) -> (TokenKind, TokenValue, Option<LexErrorKind>) {
    (TokenKind::Float, TokenValue::Float(lit), error)
}

#[cfg(test)]
mod tests;
