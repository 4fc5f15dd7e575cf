//! Diagnostic system for syntax errors.
//!
//! - Error codes for searchability (`E0xxx` lexical, `E1xxx` structural,
//!   `E2xxx` ambiguity-policy gaps)
//! - A primary span showing where it went wrong
//! - Optional notes and suggestions
//!
//! Rendering lives in [`emitter`].

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label, LabelStyle, Severity};
pub use error_code::{ErrorCategory, ErrorCode};
