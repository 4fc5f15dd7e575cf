//! The regular part of the token grammar, as a `logos` automaton.
//!
//! Comments, string bodies and heredocs only have their opening marker here.
//! The driver in `lib.rs` hands those over to the `jai_lexer_core` scanners
//! and bumps the automaton past whatever they consumed.

use jai_ir::TokenKind;
use logos::{Lexer, Logos};

/// Whether a numeric literal grew a fraction or exponent.
///
/// The automaton only matches the integer part. A fraction is taken by
/// hand, and only when a digit follows the `.`, so `1..2` stays a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumShape {
    Int,
    Float,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawToken {
    #[regex(r"(\s|\\\r?\n)+")]
    Whitespace,

    #[token("//")]
    LineCommentOpen,
    #[token("/*")]
    BlockCommentOpen,
    #[token("\"")]
    Quote,

    #[regex(r"[_\p{XID_Start}]\p{XID_Continue}*")]
    Ident,
    #[regex(r"#[_\p{XID_Start}]\p{XID_Continue}*")]
    Directive,
    #[regex(r"@[_\p{XID_Start}]\p{XID_Continue}*")]
    Note,
    #[token("#")]
    Hash,

    /// Decimal integer, or a float when a fraction or exponent follows.
    #[regex(r"[0-9](_?[0-9])*", decimal_tail)]
    Decimal(NumShape),
    #[regex(r"0[bB][01](_?[01])*")]
    BinInt,
    #[regex(r"0[oO][0-7](_?[0-7])*")]
    OctInt,
    #[regex(r"0[xX][0-9a-fA-F](_?[0-9a-fA-F])*", hex_tail)]
    Hex(NumShape),
    /// `0h` followed by the raw IEEE bit pattern, or a hex float with a
    /// fraction.
    #[regex(r"0[hH][0-9a-fA-F](_?[0-9a-fA-F])*", hex_tail)]
    FloatBits(NumShape),

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("::")]
    ColonColon,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,

    #[token("->")]
    Arrow,
    #[token("=>")]
    FatArrow,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("===")]
    TripleEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("<<<")]
    RotL,
    #[token(">>>")]
    RotR,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("&~")]
    AmpTilde,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,
    #[token("$")]
    Dollar,
    #[token("---")]
    TripleDash,

    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token("<<<=")]
    RotLEq,
    #[token(">>>=")]
    RotREq,
    #[token("||=")]
    OrOrEq,
    #[token("&&=")]
    AndAndEq,
}

impl RawToken {
    /// Kind for tokens that map 1:1 with no payload or sub-scan.
    ///
    /// Returns `None` for openers the driver must continue by hand and for
    /// numeric literals, which need cooking.
    pub(crate) fn simple_kind(self) -> Option<TokenKind> {
        let kind = match self {
            RawToken::Whitespace => TokenKind::Whitespace,
            RawToken::Ident => TokenKind::Ident,
            RawToken::Directive => TokenKind::Directive,
            RawToken::Note => TokenKind::Note,
            RawToken::Hash => TokenKind::Hash,

            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Colon => TokenKind::Colon,
            RawToken::ColonColon => TokenKind::ColonColon,
            RawToken::Dot => TokenKind::Dot,
            RawToken::DotDot => TokenKind::DotDot,

            RawToken::Arrow => TokenKind::Arrow,
            RawToken::FatArrow => TokenKind::FatArrow,
            RawToken::Eq => TokenKind::Eq,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::TripleEq => TokenKind::TripleEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Shl => TokenKind::Shl,
            RawToken::Shr => TokenKind::Shr,
            RawToken::RotL => TokenKind::RotL,
            RawToken::RotR => TokenKind::RotR,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Amp => TokenKind::Amp,
            RawToken::Pipe => TokenKind::Pipe,
            RawToken::Caret => TokenKind::Caret,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::AmpTilde => TokenKind::AmpTilde,
            RawToken::AndAnd => TokenKind::AndAnd,
            RawToken::OrOr => TokenKind::OrOr,
            RawToken::Bang => TokenKind::Bang,
            RawToken::Dollar => TokenKind::Dollar,
            RawToken::TripleDash => TokenKind::TripleDash,

            RawToken::PlusEq => TokenKind::PlusEq,
            RawToken::MinusEq => TokenKind::MinusEq,
            RawToken::StarEq => TokenKind::StarEq,
            RawToken::SlashEq => TokenKind::SlashEq,
            RawToken::PercentEq => TokenKind::PercentEq,
            RawToken::AmpEq => TokenKind::AmpEq,
            RawToken::PipeEq => TokenKind::PipeEq,
            RawToken::CaretEq => TokenKind::CaretEq,
            RawToken::ShlEq => TokenKind::ShlEq,
            RawToken::ShrEq => TokenKind::ShrEq,
            RawToken::RotLEq => TokenKind::RotLEq,
            RawToken::RotREq => TokenKind::RotREq,
            RawToken::OrOrEq => TokenKind::OrOrEq,
            RawToken::AndAndEq => TokenKind::AndAndEq,

            RawToken::LineCommentOpen
            | RawToken::BlockCommentOpen
            | RawToken::Quote
            | RawToken::Decimal(_)
            | RawToken::BinInt
            | RawToken::OctInt
            | RawToken::Hex(_)
            | RawToken::FloatBits(_) => return None,
        };
        Some(kind)
    }
}

fn decimal_tail(lex: &mut Lexer<'_, RawToken>) -> NumShape {
    number_tail(lex, |b: &u8| b.is_ascii_digit(), b"eE")
}

fn hex_tail(lex: &mut Lexer<'_, RawToken>) -> NumShape {
    number_tail(lex, |b: &u8| b.is_ascii_hexdigit(), b"pP")
}

/// Bump over `.DIGITS` and an exponent `[marker][+-]?DEC` after the integer
/// part just matched.
fn number_tail(lex: &mut Lexer<'_, RawToken>, digit: fn(&u8) -> bool, marker: &[u8]) -> NumShape {
    let rest = lex.remainder().as_bytes();
    let mut len = 0;
    if rest.first() == Some(&b'.') && rest.get(1).is_some_and(digit) {
        len = 1 + digit_run(&rest[1..], digit);
    }
    len += exponent(&rest[len..], marker);
    lex.bump(len);
    if len == 0 {
        NumShape::Int
    } else {
        NumShape::Float
    }
}

fn exponent(bytes: &[u8], marker: &[u8]) -> usize {
    if !bytes.first().is_some_and(|b| marker.contains(b)) {
        return 0;
    }
    let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));
    match digit_run(&bytes[1 + sign..], |b: &u8| b.is_ascii_digit()) {
        0 => 0,
        digits => 1 + sign + digits,
    }
}

/// Length of `D(_?D)*` at the start of `bytes`.
fn digit_run(bytes: &[u8], digit: fn(&u8) -> bool) -> usize {
    if !bytes.first().is_some_and(digit) {
        return 0;
    }
    let mut len = 1;
    while let Some(b) = bytes.get(len) {
        if digit(b) {
            len += 1;
        } else if *b == b'_' && bytes.get(len + 1).is_some_and(digit) {
            len += 2;
        } else {
            break;
        }
    }
    len
}
