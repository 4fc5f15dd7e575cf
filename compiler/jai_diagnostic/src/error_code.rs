use std::fmt;

/// Error codes for all syntax diagnostics.
///
/// Format: E#### where the first digit indicates the category:
/// - E0xxx: Lexical errors
/// - E1xxx: Structural (grammar) errors
/// - E2xxx: Ambiguity-policy gaps
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Unterminated block comment
    E0004,
    /// Invalid escape sequence
    E0005,
    /// Unterminated heredoc string
    E0006,
    /// Missing heredoc delimiter after `#string`
    E0007,

    // Structural Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Expected type
    E1005,
    /// Expected procedure body or parameter list
    E1006,
    /// Expected block
    E1007,
    /// Missing statement terminator
    E1008,
    /// Invalid declaration
    E1009,
    /// Too many errors, parsing stopped reporting
    E1010,

    // Ambiguity Policy (E2xxx)
    /// Construct the conflict rules could not settle
    E2001,
}

/// Taxonomy of syntax errors.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCategory {
    Lexical,
    Structural,
    AmbiguityPolicy,
}

impl ErrorCode {
    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexical
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            // Structural
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            // Policy
            ErrorCode::E2001 => "E2001",
        }
    }

    /// Short description used by `jaic explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character in source",
            ErrorCode::E0003 => "invalid number literal",
            ErrorCode::E0004 => "unterminated block comment",
            ErrorCode::E0005 => "invalid escape sequence",
            ErrorCode::E0006 => "unterminated heredoc string",
            ErrorCode::E0007 => "missing heredoc delimiter",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E1004 => "expected identifier",
            ErrorCode::E1005 => "expected type",
            ErrorCode::E1006 => "expected procedure",
            ErrorCode::E1007 => "expected block",
            ErrorCode::E1008 => "missing statement terminator",
            ErrorCode::E1009 => "invalid declaration",
            ErrorCode::E1010 => "too many errors",
            ErrorCode::E2001 => "ambiguous construct",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.as_str().as_bytes().get(1) {
            Some(b'0') => ErrorCategory::Lexical,
            Some(b'2') => ErrorCategory::AmbiguityPolicy,
            _ => ErrorCategory::Structural,
        }
    }

    /// Look up a code by its string form.
    pub fn parse(code: &str) -> Option<ErrorCode> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
    }

    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E1009,
        ErrorCode::E1010,
        ErrorCode::E2001,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorCategory::Lexical => "lexical",
            ErrorCategory::Structural => "structural",
            ErrorCategory::AmbiguityPolicy => "ambiguity",
        })
    }
}
