//! `jaic`: lex, parse or check Jai source files from the command line.
//!
//! ```text
//! jaic parse [--format sexp|json|tokens] [-q] [-v] <files…>
//! jaic lex   [--format tokens|json] <files…>
//! jaic check [--max-errors N] [--no-resync] [--plain] <files…>
//! jaic explain <code>
//! ```
//!
//! Syntax errors are rendered as diagnostics on stderr. The exit code is 0
//! for clean input, 1 when any file has syntax errors, 2 for a bad
//! invocation and 3 when a file cannot be read.

pub mod commands;
mod error;
pub mod logging;
mod options;

pub use error::CliError;
pub use options::{CliOptions, Command, Format};
