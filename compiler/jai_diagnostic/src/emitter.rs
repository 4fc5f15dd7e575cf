//! Diagnostic emitters.
//!
//! [`TerminalEmitter`] renders source snippets through `ariadne`;
//! [`PlainEmitter`] writes the one-line `Display` form for logs and tests.

use std::io::Write;

use ariadne::{Color, Config, Label as AriadneLabel, Report, ReportKind, Source};

use crate::{Diagnostic, Severity};

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Snippet-rendering emitter for one source file.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    file_name: String,
    source: &'src str,
    colors: bool,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn new(writer: W, file_name: impl Into<String>, source: &'src str) -> Self {
        TerminalEmitter {
            writer,
            file_name: file_name.into(),
            source,
            colors: true,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// `ariadne` counts in characters; spans count bytes.
    fn char_offset(&self, byte: u32) -> usize {
        let byte = (byte as usize).min(self.source.len());
        self.source
            .char_indices()
            .take_while(|(i, _)| *i < byte)
            .count()
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let kind = match diagnostic.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
            Severity::Note => ReportKind::Advice,
        };
        let name = self.file_name.as_str();
        let offset = diagnostic
            .primary_span()
            .map_or(0, |span| self.char_offset(span.start));

        let mut report = Report::build(kind, name, offset)
            .with_config(Config::default().with_color(self.colors))
            .with_code(diagnostic.code.as_str())
            .with_message(&diagnostic.message);

        for label in &diagnostic.labels {
            let start = self.char_offset(label.span.start);
            let end = self.char_offset(label.span.end).max(start);
            let color = if label.is_primary() {
                Color::Red
            } else {
                Color::Blue
            };
            report = report.with_label(
                AriadneLabel::new((name, start..end))
                    .with_message(&label.message)
                    .with_color(color),
            );
        }
        for note in &diagnostic.notes {
            report = report.with_note(note);
        }
        if let Some(help) = diagnostic.suggestions.first() {
            report = report.with_help(help);
        }

        // Rendering failures only happen on a broken writer; nothing to report them to.
        let _ = report
            .finish()
            .write((name, Source::from(self.source)), &mut self.writer);
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let _ = summarize(&mut self.writer, error_count, warning_count);
    }
}

/// One line per diagnostic, no source snippets.
pub struct PlainEmitter<W: Write> {
    writer: W,
}

impl<W: Write> PlainEmitter<W> {
    pub fn new(writer: W) -> Self {
        PlainEmitter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticEmitter for PlainEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let _ = writeln!(self.writer, "{diagnostic}");
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let _ = summarize(&mut self.writer, error_count, warning_count);
    }
}

fn summarize(writer: &mut impl Write, errors: usize, warnings: usize) -> std::io::Result<()> {
    let plural = |n: usize| if n == 1 { "" } else { "s" };
    match (errors, warnings) {
        (0, 0) => Ok(()),
        (e, 0) => writeln!(writer, "{e} error{}", plural(e)),
        (0, w) => writeln!(writer, "{w} warning{}", plural(w)),
        (e, w) => writeln!(
            writer,
            "{e} error{}, {w} warning{}",
            plural(e),
            plural(w)
        ),
    }
}
