//! Stack growth for deeply nested source.
//!
//! The parser recurses once per nesting level of blocks, parentheses and
//! operands, so input like ten thousand `(` in a row would overflow a fixed
//! thread stack. Every recursive entry point in `jai_parse` goes through
//! [`ensure_sufficient_stack`], which switches to a freshly allocated segment
//! when the current one runs low.
//!
//! On `wasm32` the call is a passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first moving to a new stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
