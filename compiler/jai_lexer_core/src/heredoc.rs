//! Two-phase heredoc scanner for `#string DELIM ... DELIM`.
//!
//! The delimiter is chosen by the source text, so it cannot live in a regular
//! token table. Phase one reads it after the directive, phase two scans lines
//! until one starts with it. The lexer carries the delimiter between the two
//! calls as plain data.

use std::ops::Range;

use crate::Cursor;

/// Result of the body scan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeredocBody {
    /// `true` when the cursor stopped on the closing delimiter; `false` when
    /// it ran to end of input.
    pub terminated: bool,
}

/// Phase one: read the delimiter after `#string`.
///
/// Skips horizontal whitespace, then takes the run of non-whitespace bytes.
/// Returns `None` if the line (or input) ends first; the cursor is then left
/// after the whitespace.
pub fn heredoc_delimiter(cursor: &mut Cursor<'_>) -> Option<Range<u32>> {
    cursor.eat_horizontal_whitespace();
    let start = cursor.pos();
    while !cursor.is_eof() && !cursor.current().is_ascii_whitespace() {
        cursor.advance_char();
    }
    let end = cursor.pos();
    (end > start).then_some(start..end)
}

/// Phase two: scan the body. The cursor must be just past the delimiter.
///
/// The body runs to the first later line whose first non-blank text is
/// `delimiter` followed by a character that cannot continue an identifier.
/// On success the cursor rests on that closing delimiter, so the indentation
/// before it belongs to the body.
pub fn heredoc_body(cursor: &mut Cursor<'_>, delimiter: &[u8]) -> HeredocBody {
    debug_assert!(!delimiter.is_empty());
    loop {
        cursor.eat_until_newline_or_eof();
        if !cursor.eat_newline() {
            return HeredocBody { terminated: false };
        }

        let mut ahead = *cursor;
        ahead.eat_horizontal_whitespace();
        if ahead.starts_with(delimiter) && !continues_identifier(&ahead, delimiter.len()) {
            *cursor = ahead;
            return HeredocBody { terminated: true };
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "the delimiter is a slice of the source, bounded by u32"
)]
fn continues_identifier(ahead: &Cursor<'_>, delimiter_len: usize) -> bool {
    let mut after = *ahead;
    after.advance_n(delimiter_len as u32);
    let byte = after.current();
    byte == b'_' || byte.is_ascii_alphanumeric() || byte >= 0x80
}

#[cfg(test)]
mod tests;
