//! Command handlers.
//!
//! Files are read, lexed and parsed in parallel; output and diagnostics are
//! written afterwards in the order the files were given, so a run prints
//! the same text whatever the thread count.

mod output;

use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use jai_diagnostic::emitter::{DiagnosticEmitter, PlainEmitter, TerminalEmitter};
use jai_diagnostic::ErrorCode;
use jai_parse::SyntaxError;
use rayon::prelude::*;
use tracing::{debug, debug_span};

use crate::{CliError, CliOptions, Command, Format};

/// Result of processing one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub source: String,
    /// Text for stdout.
    pub output: String,
    pub errors: Vec<SyntaxError>,
}

/// Totals over a whole run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    /// Syntax errors across all files.
    pub errors: usize,
    /// Files that could not be read or decoded.
    pub failed: usize,
}

impl Summary {
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            3
        } else if self.errors > 0 {
            1
        } else {
            0
        }
    }
}

/// Run `options.command` over every input file.
pub fn run(options: &CliOptions) -> Result<Summary, CliError> {
    let results: Vec<Result<FileReport, CliError>> = options
        .files
        .par_iter()
        .map(|path| {
            let source = read_source(path)?;
            process(path, source, options)
        })
        .collect();

    let colors = !options.plain && std::io::stderr().is_terminal();
    let mut stdout = std::io::stdout().lock();
    let mut summary = Summary::default();
    for result in results {
        summary.files += 1;
        let report = match result {
            Ok(report) => report,
            Err(error) => {
                eprintln!("error: {error}");
                summary.failed += 1;
                continue;
            }
        };
        stdout.write_all(report.output.as_bytes())?;
        report_errors(&report, options.plain, colors);
        if options.command == Command::Check && !options.quiet {
            writeln!(stdout, "{}", status_line(&report))?;
        }
        summary.errors += report.errors.len();
    }
    stdout.flush()?;

    if summary.errors > 0 && !options.quiet {
        PlainEmitter::new(std::io::stderr()).emit_summary(summary.errors, 0);
    }
    debug!(?summary, "done");
    Ok(summary)
}

/// Lex or parse one file and render its output.
pub fn process(path: &Path, source: String, options: &CliOptions) -> Result<FileReport, CliError> {
    let _span = debug_span!("file", path = %path.display()).entered();
    let show = !options.quiet;

    let (text, errors): (String, Vec<SyntaxError>) = match options.command {
        Command::Lex => {
            let lexed = jai_lexer::lex(&source);
            let text = match options.format {
                _ if !show => String::new(),
                Format::Json => output::json(path, lexed.tokens.as_slice())?,
                Format::Sexp | Format::Tokens => output::tokens(lexed.tokens.iter(), &source),
            };
            (text, lexed.errors.iter().map(SyntaxError::from).collect())
        }
        Command::Parse | Command::Check => {
            let parse = jai_parse::parse_with_options(&source, &options.parse);
            let text = match options.format {
                _ if !show || options.command == Command::Check => String::new(),
                Format::Sexp => output::sexp(parse.tree()),
                Format::Json => output::json(path, parse.tree())?,
                Format::Tokens => output::tokens(parse.tree().leaves(), &source),
            };
            (text, parse.into_parts().1)
        }
    };

    Ok(FileReport {
        path: path.to_path_buf(),
        source,
        output: text,
        errors,
    })
}

/// File contents as text; `-` reads standard input.
fn read_source(path: &Path) -> Result<String, CliError> {
    let read_error = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };
    let bytes = if path == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .map_err(read_error)?;
        bytes
    } else {
        std::fs::read(path).map_err(read_error)?
    };
    let text = jai_parse::check_input(&bytes).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.to_string())
}

fn report_errors(report: &FileReport, plain: bool, colors: bool) {
    if report.errors.is_empty() {
        return;
    }
    let diagnostics: Vec<_> = report.errors.iter().map(SyntaxError::to_diagnostic).collect();
    if plain {
        let mut emitter = PlainEmitter::new(std::io::stderr());
        emitter.emit_all(&diagnostics);
    } else {
        let name = report.path.display().to_string();
        let mut emitter =
            TerminalEmitter::new(std::io::stderr(), name, &report.source).with_colors(colors);
        emitter.emit_all(&diagnostics);
    }
}

fn status_line(report: &FileReport) -> String {
    let path = report.path.display();
    match report.errors.len() {
        0 => format!("{path}: ok"),
        1 => format!("{path}: 1 error"),
        n => format!("{path}: {n} errors"),
    }
}

/// One-line description of an error code such as `E1008`.
pub fn explain(code: &str) -> Result<String, CliError> {
    let code = ErrorCode::parse(code)
        .ok_or_else(|| CliError::Usage(format!("unknown error code `{code}`")))?;
    Ok(format!(
        "{code} ({} error): {}",
        code.category(),
        code.description()
    ))
}
