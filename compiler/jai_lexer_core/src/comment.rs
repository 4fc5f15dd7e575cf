//! Comment scanners.

use crate::Cursor;

/// How a block comment ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockCommentEnd {
    /// Depth returned to zero at a `*/`.
    Terminated,
    /// Input ran out with `depth` comments still open.
    Unterminated { depth: u32 },
}

/// Scan a block comment. The cursor must be on the opening `/*`.
///
/// Nested `/* */` pairs are tracked with a depth counter, so the scan is a
/// single linear pass no matter how the delimiters are arranged.
pub fn block_comment(cursor: &mut Cursor<'_>) -> BlockCommentEnd {
    debug_assert!(cursor.starts_with(b"/*"));
    cursor.advance_n(2);
    let mut depth: u32 = 1;

    loop {
        match cursor.skip_to_block_comment_delim() {
            b'/' if cursor.peek() == b'*' => {
                cursor.advance_n(2);
                depth += 1;
            }
            b'*' if cursor.peek() == b'/' => {
                cursor.advance_n(2);
                depth -= 1;
                if depth == 0 {
                    return BlockCommentEnd::Terminated;
                }
            }
            0 if cursor.is_eof() => return BlockCommentEnd::Unterminated { depth },
            _ => cursor.advance(),
        }
    }
}

/// Scan a line comment. The cursor must be on the opening `//`.
///
/// A run of backslashes escapes the character after it, and that character
/// may be a line break, which continues the comment on the next line. The
/// terminating newline is not consumed.
pub fn line_comment(cursor: &mut Cursor<'_>) {
    debug_assert!(cursor.starts_with(b"//"));
    cursor.advance_n(2);

    loop {
        match cursor.skip_to_line_comment_delim() {
            b'\\' => {
                cursor.eat_while(|b| b == b'\\');
                if !cursor.eat_newline() && !cursor.is_eof() {
                    cursor.advance_char();
                }
            }
            _ => return,
        }
    }
}

#[cfg(test)]
mod tests;
