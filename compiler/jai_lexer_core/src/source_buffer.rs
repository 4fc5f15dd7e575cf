//! Sentinel-terminated source buffer for bounds-check-free scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! so scanners can detect EOF without explicit bounds checking. The total
//! size is rounded up to the next 64-byte boundary, which also provides safe
//! padding for `peek()` at the last source byte.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Zero bytes that always follow the source: the sentinel, and one more so
/// `peek()` at the sentinel stays in bounds.
const TAIL: usize = 2;

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    source_len: u32,
}

impl SourceBuffer {
    /// Copy `source` into a padded buffer with a trailing sentinel.
    ///
    /// Sources larger than `u32::MAX` bytes saturate `source_len`; the lexer
    /// rejects such files before getting here.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        let padded_len = (source_len + TAIL + CACHE_LINE - 1) & !(CACHE_LINE - 1);
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        Self {
            buf,
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        self.cursor_at(0)
    }

    /// Create a [`Cursor`] positioned at `pos`, clamped to the source end.
    pub fn cursor_at(&self, pos: u32) -> Cursor<'_> {
        Cursor::new(&self.buf, pos.min(self.source_len), self.source_len)
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}
