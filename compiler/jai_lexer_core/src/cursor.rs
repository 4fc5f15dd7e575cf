//! Cursor over a sentinel-terminated buffer.
//!
//! EOF is detected when the current byte equals the sentinel (`0x00`) and the
//! position has reached the source length. A null at `pos < source_len` is
//! an interior null, not EOF.

/// Byte cursor. `Copy`, so a snapshot is just a copy.
///
/// # Invariant
///
/// `buf[source_len] == 0x00`, at least one more byte follows it, and every
/// byte after the source is `0x00`. [`SourceBuffer`](crate::SourceBuffer)
/// construction guarantees this.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
}

const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], pos: u32, source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) + 1 < buf.len(),
            "sentinel and peek byte must be within buffer bounds"
        );
        Self {
            buf,
            pos,
            source_len,
        }
    }

    /// Byte at the current position; `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Byte one position ahead. Padding makes this safe at EOF.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Source bytes from the current position to the end.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos as usize..self.source_len as usize]
    }

    /// Does the remaining input start with `prefix`?
    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Advance while `pred` holds. `pred(0)` must be `false`.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Width of the UTF-8 character starting with `byte`.
    #[inline]
    fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past one full UTF-8 character, never past EOF.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.pos = (self.pos + width).min(self.source_len);
    }

    /// Advance past spaces and tabs.
    #[inline]
    pub fn eat_horizontal_whitespace(&mut self) {
        self.eat_while(|b| b == b' ' || b == b'\t');
    }

    /// Advance to the next `\n` (not consumed) or EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        match memchr::memchr(b'\n', self.rest()) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
    }

    /// Consume a `\n` or `\r\n` line break if one is at the cursor.
    #[inline]
    pub fn eat_newline(&mut self) -> bool {
        match (self.current(), self.peek()) {
            (b'\n', _) => {
                self.advance();
                true
            }
            (b'\r', b'\n') => {
                self.advance_n(2);
                true
            }
            _ => false,
        }
    }

    /// Move to `found` (relative to the cursor); returns the byte there, or 0 at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by source_len which fits in u32"
    )]
    fn skip_to(&mut self, found: Option<usize>) -> u8 {
        match found {
            Some(offset) => {
                self.pos += offset as u32;
                self.current()
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Skip ordinary string content to the next `"`, `\` or `\n`.
    pub fn skip_to_string_delim(&mut self) -> u8 {
        let found = memchr::memchr3(b'"', b'\\', b'\n', self.rest());
        self.skip_to(found)
    }

    /// Skip block comment text to the next `*` or `/`.
    pub fn skip_to_block_comment_delim(&mut self) -> u8 {
        let found = memchr::memchr2(b'*', b'/', self.rest());
        self.skip_to(found)
    }

    /// Skip line comment text to the next `\` or `\n`.
    pub fn skip_to_line_comment_delim(&mut self) -> u8 {
        let found = memchr::memchr2(b'\\', b'\n', self.rest());
        self.skip_to(found)
    }
}
