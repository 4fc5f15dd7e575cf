//! Literal cooking: numeric values and escape scalars.
//!
//! The raw automaton only decides where a literal ends. These functions turn
//! its text into the payload stored on the token. A failure still yields a
//! value (saturated or `U+FFFD`) so the token can be emitted.

use jai_ir::{FloatLit, IntLit, NumBase};
use jai_lexer_core::EscapeForm;

use crate::LexErrorKind;

/// Parse digits in `radix`, skipping `_` separators.
fn parse_digits(digits: &str, radix: u32) -> Option<u64> {
    let mut value: u64 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix)?;
        value = value.checked_mul(u64::from(radix))?;
        value = value.checked_add(u64::from(digit))?;
    }
    Some(value)
}

/// Cook an integer literal. `text` includes any `0b`/`0o`/`0x` prefix.
pub(crate) fn cook_int(text: &str, base: NumBase) -> (IntLit, Option<LexErrorKind>) {
    let digits = match base {
        NumBase::Decimal => text,
        _ => text.get(2..).unwrap_or(""),
    };
    match parse_digits(digits, base.radix()) {
        Some(value) => (IntLit { value, base }, None),
        None => (
            IntLit {
                value: u64::MAX,
                base,
            },
            Some(LexErrorKind::IntOverflow),
        ),
    }
}

/// Cook a decimal float such as `1.5`, `2e10` or `1_000.25e-3`.
pub(crate) fn cook_decimal_float(text: &str) -> (FloatLit, Option<LexErrorKind>) {
    let parsed = if text.contains('_') {
        text.replace('_', "").parse::<f64>()
    } else {
        text.parse::<f64>()
    };
    match parsed {
        Ok(value) => (FloatLit::new(value, NumBase::Decimal), None),
        Err(_) => (
            FloatLit::new(f64::NAN, NumBase::Decimal),
            Some(LexErrorKind::InvalidFloat),
        ),
    }
}

/// Cook a `0h` bit-pattern float.
///
/// Up to eight hex digits are an `f32` pattern, up to sixteen an `f64`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "at most eight digits reach the u32 branch"
)]
pub(crate) fn cook_float_bits(text: &str) -> (FloatLit, Option<LexErrorKind>) {
    let digits = text.get(2..).unwrap_or("");
    let count = digits.chars().filter(|c| *c != '_').count();
    match (count, parse_digits(digits, 16)) {
        (0..=8, Some(bits)) => (
            FloatLit::new(f64::from(f32::from_bits(bits as u32)), NumBase::Hex),
            None,
        ),
        (9..=16, Some(bits)) => (FloatLit::new(f64::from_bits(bits), NumBase::Hex), None),
        _ => (
            FloatLit::new(f64::NAN, NumBase::Hex),
            Some(LexErrorKind::FloatBitsTooLong { digits: count }),
        ),
    }
}

/// Cook a hex float with a fraction and/or binary exponent: `0x1.8p3`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "digit counts and exponents are clamped before conversion"
)]
pub(crate) fn cook_hex_float(text: &str) -> (FloatLit, Option<LexErrorKind>) {
    let body = text.get(2..).unwrap_or("");
    let (mantissa, exponent) = match body.find(['p', 'P']) {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut value = 0.0_f64;
    for digit in whole.chars().chain(fraction.chars()).filter_map(|c| c.to_digit(16)) {
        value = value * 16.0 + f64::from(digit);
    }
    let fraction_digits = fraction.chars().filter(|c| *c != '_').count().min(4096) as i32;

    let exponent = match exponent {
        None => 0,
        Some(exp) => {
            let (negative, digits) = match exp.as_bytes().first() {
                Some(b'-') => (true, &exp[1..]),
                Some(b'+') => (false, &exp[1..]),
                _ => (false, exp),
            };
            let Some(magnitude) = parse_digits(digits, 10) else {
                return (
                    FloatLit::new(f64::NAN, NumBase::Hex),
                    Some(LexErrorKind::InvalidFloat),
                );
            };
            let magnitude = magnitude.min(1 << 16) as i32;
            if negative {
                -magnitude
            } else {
                magnitude
            }
        }
    };

    let scale = exponent - 4 * fraction_digits;
    (FloatLit::new(value * 2f64.powi(scale), NumBase::Hex), None)
}

/// Decode an escape sequence. `text` starts at the backslash.
pub(crate) fn cook_escape(text: &str, form: EscapeForm) -> Result<char, LexErrorKind> {
    let body = text.get(1..).unwrap_or("");
    let invalid = || LexErrorKind::InvalidEscape {
        text: text.to_owned(),
    };
    let scalar = |digits: &str, radix: u32| {
        parse_digits(digits, radix)
            .and_then(|value| u32::try_from(value).ok())
            .and_then(char::from_u32)
    };

    let decoded = match form {
        EscapeForm::Single => body.chars().next().map(single_escape),
        EscapeForm::Octal => scalar(body, 8),
        EscapeForm::Hex | EscapeForm::Unicode4 | EscapeForm::Unicode8 => {
            scalar(body.get(1..).unwrap_or(""), 16)
        }
        EscapeForm::UnicodeBraced => body
            .get(2..body.len().saturating_sub(1))
            .and_then(|digits| scalar(digits, 16)),
        EscapeForm::Invalid => None,
    };
    decoded.ok_or_else(invalid)
}

fn single_escape(c: char) -> char {
    match c {
        'n' | '\r' => '\n',
        't' => '\t',
        'r' => '\r',
        'a' => '\u{7}',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        'e' => '\u{1b}',
        other => other,
    }
}
