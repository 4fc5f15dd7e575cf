//! String literal body scanner.
//!
//! A string body is a sequence of pieces: content runs, escape sequences and
//! raw line breaks, closed by `"`. The lexer calls [`string_piece`] in a loop
//! after the opening quote and emits one token per piece.

use crate::Cursor;

/// Shape of an escape sequence, as written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EscapeForm {
    /// `\n`, `\"`, `\\` and every other single character except `x`, `u` and
    /// octal digits.
    Single,
    /// `\7`, `\12`, `\177`
    Octal,
    /// `\xNN`
    Hex,
    /// `\uNNNN`
    Unicode4,
    /// `\u{N...}`
    UnicodeBraced,
    /// `\UNNNNNNNN`
    Unicode8,
    /// A backslash whose continuation matches none of the forms above.
    Invalid,
}

/// One piece of a string body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StringPiece {
    /// A maximal run of bytes that are not `"`, `\` or `\n`.
    Content,
    /// A raw `\n` inside the literal. A preceding `\r` belongs to the
    /// content run before it.
    LineBreak,
    Escape(EscapeForm),
    /// The closing `"`.
    Close,
    /// End of input before the closing quote. Nothing consumed.
    Eof,
}

/// Scan the next piece of a string body.
pub fn string_piece(cursor: &mut Cursor<'_>) -> StringPiece {
    match cursor.current() {
        b'"' => {
            cursor.advance();
            StringPiece::Close
        }
        b'\\' => StringPiece::Escape(escape(cursor)),
        _ if cursor.is_eof() => StringPiece::Eof,
        b'\n' => {
            cursor.advance();
            StringPiece::LineBreak
        }
        _ => {
            content_run(cursor);
            StringPiece::Content
        }
    }
}

fn content_run(cursor: &mut Cursor<'_>) {
    cursor.skip_to_string_delim();
}

fn eat_hex(cursor: &mut Cursor<'_>, max: u32) -> u32 {
    let mut n = 0;
    while n < max && cursor.current().is_ascii_hexdigit() {
        cursor.advance();
        n += 1;
    }
    n
}

/// Scan an escape sequence. The cursor must be on the backslash.
fn escape(cursor: &mut Cursor<'_>) -> EscapeForm {
    cursor.advance();
    match cursor.current() {
        b'x' => {
            cursor.advance();
            if eat_hex(cursor, 2) == 2 {
                EscapeForm::Hex
            } else {
                EscapeForm::Invalid
            }
        }
        b'u' if cursor.peek() == b'{' => {
            cursor.advance_n(2);
            let digits = eat_hex(cursor, u32::MAX);
            if digits > 0 && cursor.current() == b'}' {
                cursor.advance();
                EscapeForm::UnicodeBraced
            } else {
                EscapeForm::Invalid
            }
        }
        b'u' => {
            cursor.advance();
            if eat_hex(cursor, 4) == 4 {
                EscapeForm::Unicode4
            } else {
                EscapeForm::Invalid
            }
        }
        b'U' => {
            let mut ahead = *cursor;
            ahead.advance();
            if eat_hex(&mut ahead, 8) == 8 {
                *cursor = ahead;
                EscapeForm::Unicode8
            } else {
                // `\U` without eight digits is an ordinary single-character escape.
                cursor.advance();
                EscapeForm::Single
            }
        }
        b'0'..=b'7' => {
            let mut n = 0;
            while n < 3 && matches!(cursor.current(), b'0'..=b'7') {
                cursor.advance();
                n += 1;
            }
            EscapeForm::Octal
        }
        _ if cursor.is_eof() => EscapeForm::Invalid,
        _ => {
            if !cursor.eat_newline() {
                cursor.advance_char();
            }
            EscapeForm::Single
        }
    }
}
