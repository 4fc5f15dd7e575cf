use std::fmt;

use jai_ir::Span;

use crate::{ErrorCategory, ErrorCode};

/// How loudly a diagnostic is reported.
///
/// The parser itself only produces errors; warnings exist for tools that
/// layer lints over the tree.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Note,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a label marks the offending text or something it relates to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LabelStyle {
    Primary,
    Secondary,
}

/// A source range annotated with a short message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub style: LabelStyle,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.style == LabelStyle::Primary
    }
}

/// A syntax problem in renderable form: code, headline, source labels and
/// trailing notes and fixes.
///
/// Built from `LexError::to_diagnostic` or `SyntaxError::to_diagnostic`;
/// [`crate::emitter`] turns it into text.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "a diagnostic does nothing until it is emitted"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    /// Fix hints, rendered as `help:` lines.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: code.description().to_string(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// An error whose message defaults to the code's description.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic::new(code, Severity::Error)
    }

    pub fn warning(code: ErrorCode) -> Self {
        Diagnostic::new(code, Severity::Warning)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Mark the offending text.
    pub fn with_label(self, span: Span, message: impl Into<String>) -> Self {
        self.labeled(Label::primary(span, message))
    }

    /// Point at related text, such as the opener of an unclosed block.
    pub fn with_secondary_label(self, span: Span, message: impl Into<String>) -> Self {
        self.labeled(Label::secondary(span, message))
    }

    fn labeled(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(|label| label.span)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// `error[E1002]: message`, then one indented line per label, note and
/// suggestion. Used by the plain emitter.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        for label in &self.labels {
            let lead = match label.style {
                LabelStyle::Primary => "at",
                LabelStyle::Secondary => "see",
            };
            write!(f, "\n    {lead} {}: {}", label.span, label.message)?;
        }
        for note in &self.notes {
            write!(f, "\n    note: {note}")?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n    help: {suggestion}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn message_defaults_to_code_description() {
        let diag = Diagnostic::error(ErrorCode::E1002);
        assert_eq!(diag.message, ErrorCode::E1002.description());
        assert_eq!(diag.category(), ErrorCategory::Structural);
        assert!(diag.labels.is_empty());
    }

    #[test]
    fn builder_collects_labels_and_notes() {
        let diag = Diagnostic::error(ErrorCode::E1003)
            .with_message("expected `}`, found end of file")
            .with_label(Span::point(20), "file ends here")
            .with_secondary_label(Span::new(7, 8), "block opened here")
            .with_note("every `{` needs a matching `}`");

        assert!(diag.is_error());
        assert_eq!(diag.primary_span(), Some(Span::point(20)));
        assert_eq!(diag.labels[1].style, LabelStyle::Secondary);
        assert_eq!(diag.notes.len(), 1);
    }

    #[test]
    fn plain_rendering() {
        let diag = Diagnostic::error(ErrorCode::E0001)
            .with_message("unterminated string literal")
            .with_label(Span::new(5, 11), "string starts here")
            .with_secondary_label(Span::new(0, 1), "in this declaration")
            .with_suggestion("add a closing `\"`");

        assert_eq!(
            diag.to_string(),
            "error[E0001]: unterminated string literal\n    at 5..11: string starts here\n    see 0..1: in this declaration\n    help: add a closing `\"`"
        );
    }

    #[test]
    fn only_secondary_labels_have_no_primary_span() {
        let diag = Diagnostic::warning(ErrorCode::E2001)
            .with_secondary_label(Span::new(1, 2), "other reading");
        assert_eq!(diag.primary_span(), None);
        assert!(!diag.is_error());
        assert!(diag.to_string().starts_with("warning[E2001]"));
    }
}
