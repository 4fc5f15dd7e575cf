//! Text produced for each file: tree dumps and token listings.

use std::fmt::Write;
use std::path::Path;

use jai_ir::{SyntaxNode, Token, TokenKind};

use crate::CliError;

pub(super) fn sexp(tree: &SyntaxNode) -> String {
    let mut out = tree.to_sexp();
    out.push('\n');
    out
}

pub(super) fn json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<String, CliError> {
    let mut out = serde_json::to_string_pretty(value).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    out.push('\n');
    Ok(out)
}

/// One line per token: span, kind and quoted text. `Eof` is left out.
pub(super) fn tokens<'t>(tokens: impl IntoIterator<Item = &'t Token>, source: &str) -> String {
    let mut out = String::new();
    for token in tokens {
        if token.kind == TokenKind::Eof {
            continue;
        }
        let span = token.span.to_string();
        let _ = writeln!(
            out,
            "{span:<12} {:<16} {:?}",
            format!("{:?}", token.kind),
            token.text(source)
        );
    }
    out
}
