//! Command-line arguments.

use std::path::PathBuf;

use jai_parse::ParseOptions;

use crate::CliError;

/// What to do with each input file.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Command {
    /// Print the syntax tree.
    Parse,
    /// Print the token stream.
    Lex,
    /// Report errors only.
    Check,
}

impl Command {
    fn from_name(name: &str) -> Option<Command> {
        match name {
            "parse" => Some(Command::Parse),
            "lex" => Some(Command::Lex),
            "check" => Some(Command::Check),
            _ => None,
        }
    }
}

/// Output format for `parse` and `lex`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Format {
    #[default]
    Sexp,
    Json,
    /// One token per line.
    Tokens,
}

impl std::str::FromStr for Format {
    type Err = CliError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "sexp" => Ok(Format::Sexp),
            "json" => Ok(Format::Json),
            "tokens" => Ok(Format::Tokens),
            _ => Err(CliError::UnknownFormat(name.to_string())),
        }
    }
}

/// Everything a run needs, parsed from `argv`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliOptions {
    pub command: Command,
    pub format: Format,
    /// Suppress tree output and the per-file summary.
    pub quiet: bool,
    pub verbose: bool,
    /// Render diagnostics without colors or snippets.
    pub plain: bool,
    pub parse: ParseOptions,
    pub files: Vec<PathBuf>,
}

impl CliOptions {
    /// Parse arguments after the program name.
    pub fn from_args(args: &[String]) -> Result<CliOptions, CliError> {
        let Some((name, rest)) = args.split_first() else {
            return Err(CliError::Usage("missing command".to_string()));
        };
        let command =
            Command::from_name(name).ok_or_else(|| CliError::UnknownCommand(name.clone()))?;

        let mut options = CliOptions {
            command,
            format: Format::default(),
            quiet: false,
            verbose: false,
            plain: false,
            parse: ParseOptions::default(),
            files: Vec::new(),
        };
        let mut iter = rest.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-q" | "--quiet" => options.quiet = true,
                "-v" | "--verbose" => options.verbose = true,
                "--plain" => options.plain = true,
                "--no-resync" => options.parse.resync_on_declaration = false,
                "--format" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| CliError::Usage("`--format` needs a value".to_string()))?;
                    options.format = value.parse()?;
                }
                "--max-errors" => {
                    let value = iter.next().ok_or_else(|| {
                        CliError::Usage("`--max-errors` needs a value".to_string())
                    })?;
                    options.parse.max_errors = Some(parse_count(value)?);
                }
                other => {
                    if let Some(value) = other.strip_prefix("--format=") {
                        options.format = value.parse()?;
                    } else if let Some(value) = other.strip_prefix("--max-errors=") {
                        options.parse.max_errors = Some(parse_count(value)?);
                    } else if other.starts_with('-') && other != "-" {
                        return Err(CliError::UnknownFlag(other.to_string()));
                    } else {
                        options.files.push(PathBuf::from(other));
                    }
                }
            }
        }

        if options.files.is_empty() {
            return Err(CliError::Usage("no input files".to_string()));
        }
        if options.command == Command::Lex && options.format == Format::Sexp {
            options.format = Format::Tokens;
        }
        Ok(options)
    }
}

fn parse_count(value: &str) -> Result<usize, CliError> {
    value
        .parse()
        .map_err(|_| CliError::Usage(format!("`{value}` is not a number")))
}
