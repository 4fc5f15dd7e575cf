//! Parse error types.
//!
//! [`SyntaxError`] is the one error shape the parser reports. Lexical errors
//! are converted into it so callers see a single list, ordered by position.
//! [`InputError`] covers input the parser refuses before lexing.

use std::fmt;

use jai_diagnostic::{Diagnostic, ErrorCategory, ErrorCode};
use jai_ir::{Span, SyntaxKind};
use jai_lexer::LexError;

/// Syntax error with error code for rich diagnostics.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    /// Location of the error.
    pub span: Span,
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    pub category: ErrorCategory,
    /// The construct being parsed when the error occurred.
    pub context: Option<ErrorContext>,
    /// Second location worth showing, such as where an unclosed block stops.
    pub related: Option<(Span, &'static str)>,
}

impl SyntaxError {
    /// Create a new syntax error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        SyntaxError {
            span,
            code,
            message: message.into(),
            category: code.category(),
            context: None,
            related: None,
        }
    }

    /// Add context for better error messages.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub fn with_related(mut self, span: Span, label: &'static str) -> Self {
        self.related = Some((span, label));
        self
    }

    /// Convert to a full Diagnostic for rich error reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.context {
            Some(context) => format!("while parsing {context}"),
            None => "here".to_string(),
        };
        let mut diagnostic = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, label);
        if let Some((span, label)) = self.related {
            diagnostic = diagnostic.with_secondary_label(span, label);
        }
        match self.code {
            ErrorCode::E1008 => diagnostic.with_suggestion("add `;` here"),
            ErrorCode::E2001 => diagnostic.with_note(
                "two grammar rules matched the same text and no declared conflict decides between them",
            ),
            _ => diagnostic,
        }
    }
}

impl From<&LexError> for SyntaxError {
    fn from(error: &LexError) -> Self {
        SyntaxError::new(error.code(), error.kind.to_string(), error.span)
    }
}

/// The construct being parsed, for "while parsing X" labels.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorContext(SyntaxKind);

impl ErrorContext {
    pub fn new(kind: SyntaxKind) -> Self {
        ErrorContext(kind)
    }

    pub fn kind(self) -> SyntaxKind {
        self.0
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.0.name();
        let article = match name.as_bytes().first() {
            Some(b'a' | b'e' | b'i' | b'o' | b'u') => "an",
            _ => "a",
        };
        write!(f, "{article} {}", name.replace('_', " "))
    }
}

/// Input rejected before parsing.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum InputError {
    #[error("source is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
    #[error("source is {len} bytes; at most {} bytes can be addressed", u32::MAX)]
    TooLarge { len: usize },
}
