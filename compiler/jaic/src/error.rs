//! CLI failures. Syntax errors in the input are not among them: those are
//! reported as diagnostics and only change the exit code.

use std::path::PathBuf;

use jai_parse::InputError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("unknown flag `{0}`")]
    UnknownFlag(String),
    #[error("unknown format `{0}` (expected sexp, json or tokens)")]
    UnknownFormat(String),
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: InputError,
    },
    #[error("cannot serialize {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot write output: {0}")]
    Write(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code: 2 for bad invocations, 3 for unreadable input.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_)
            | CliError::UnknownCommand(_)
            | CliError::UnknownFlag(_)
            | CliError::UnknownFormat(_) => 2,
            CliError::Read { .. }
            | CliError::Input { .. }
            | CliError::Json { .. }
            | CliError::Write(_) => 3,
        }
    }

    pub fn is_usage(&self) -> bool {
        self.exit_code() == 2
    }
}
