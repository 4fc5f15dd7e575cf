//! Lexer error types.
//!
//! Every error carries WHERE (`span`) and WHAT (`kind`). The token that
//! triggered the error is still emitted, so the parser sees a complete,
//! gap-free stream.

use jai_diagnostic::{Diagnostic, ErrorCode};
use jai_ir::Span;

/// A lexical error at a span of source.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment ({depth} still open)")]
    UnterminatedBlockComment { depth: u32 },
    #[error("unterminated heredoc string, no line starts with `{delimiter}`")]
    UnterminatedHeredoc { delimiter: String },
    #[error("`#string` needs a delimiter on the same line")]
    MissingHeredocDelimiter,
    #[error("invalid escape sequence `{text}`")]
    InvalidEscape { text: String },
    #[error("integer literal does not fit in 64 bits")]
    IntOverflow,
    #[error("float bit pattern has {digits} hex digits, expected at most 16")]
    FloatBitsTooLong { digits: usize },
    #[error("invalid float literal")]
    InvalidFloat,
    #[error("unexpected character `{ch}`")]
    InvalidCharacter { ch: char },
}

impl LexErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::InvalidCharacter { .. } => ErrorCode::E0002,
            LexErrorKind::IntOverflow
            | LexErrorKind::FloatBitsTooLong { .. }
            | LexErrorKind::InvalidFloat => ErrorCode::E0003,
            LexErrorKind::UnterminatedBlockComment { .. } => ErrorCode::E0004,
            LexErrorKind::InvalidEscape { .. } => ErrorCode::E0005,
            LexErrorKind::UnterminatedHeredoc { .. } => ErrorCode::E0006,
            LexErrorKind::MissingHeredocDelimiter => ErrorCode::E0007,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            LexErrorKind::UnterminatedString => "string starts here and never closes",
            LexErrorKind::UnterminatedBlockComment { .. } => "comment starts here",
            LexErrorKind::UnterminatedHeredoc { .. } => "heredoc starts here",
            LexErrorKind::MissingHeredocDelimiter => "delimiter expected after this",
            LexErrorKind::InvalidEscape { .. } => "not a valid escape",
            LexErrorKind::IntOverflow
            | LexErrorKind::FloatBitsTooLong { .. }
            | LexErrorKind::InvalidFloat => "in this literal",
            LexErrorKind::InvalidCharacter { .. } => "not valid here",
        }
    }
}

impl LexError {
    pub fn new(span: Span, kind: LexErrorKind) -> Self {
        LexError { span, kind }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, self.kind.label());
        match &self.kind {
            LexErrorKind::UnterminatedHeredoc { delimiter } => diagnostic
                .with_suggestion(format!("end the string with `{delimiter}` at the start of a line")),
            LexErrorKind::MissingHeredocDelimiter => {
                diagnostic.with_suggestion("write the delimiter right after `#string`, e.g. `#string DONE`")
            }
            LexErrorKind::UnterminatedString => diagnostic.with_suggestion("add a closing `\"`"),
            _ => diagnostic,
        }
    }
}
