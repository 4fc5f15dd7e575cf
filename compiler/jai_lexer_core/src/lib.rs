//! Low-level scanning for the parts of Jai that are not regular languages.
//!
//! The regular token table lives in `jai_lexer` (a `logos` automaton). The
//! constructs here need state that a DFA cannot carry, so `jai_lexer` hands
//! over to them explicitly:
//!
//! - [`block_comment`]: `/* ... */` with arbitrary nesting, via a depth counter
//! - [`line_comment`]: `//` comments where a backslash escapes the next
//!   character, newline included
//! - [`string_piece`]: the body of a `"..."` literal, one piece at a time
//! - [`heredoc_delimiter`] and [`heredoc_body`]: `#string` literals, scanned
//!   in two phases with the delimiter passed explicitly between them
//!
//! All scanners run over a [`Cursor`] on a sentinel-terminated
//! [`SourceBuffer`] and report byte positions only; slicing and decoding are
//! left to the caller.

mod comment;
mod cursor;
mod heredoc;
mod source_buffer;
mod string;

pub use comment::{block_comment, line_comment, BlockCommentEnd};
pub use cursor::Cursor;
pub use heredoc::{heredoc_body, heredoc_delimiter, HeredocBody};
pub use source_buffer::SourceBuffer;
pub use string::{string_piece, EscapeForm, StringPiece};
