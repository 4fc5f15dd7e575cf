//! Token types produced by the lexer.
//!
//! `TokenKind` is a fieldless enum so that it fits the parser's bitset-based
//! `TokenSet`. Literal payloads ride alongside in [`TokenValue`].

use std::fmt;

use crate::Span;

/// Numeric base of an integer or float literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumBase {
    Binary,
    Octal,
    Decimal,
    Hex,
}

impl NumBase {
    /// Radix for digit parsing.
    pub const fn radix(self) -> u32 {
        match self {
            NumBase::Binary => 2,
            NumBase::Octal => 8,
            NumBase::Decimal => 10,
            NumBase::Hex => 16,
        }
    }
}

/// Decoded integer literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntLit {
    pub value: u64,
    pub base: NumBase,
}

/// Decoded float literal, stored as `f64` bits for `Eq + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatLit {
    pub bits: u64,
    pub base: NumBase,
}

impl FloatLit {
    pub fn new(value: f64, base: NumBase) -> Self {
        FloatLit {
            bits: value.to_bits(),
            base,
        }
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(self.bits)
    }
}

/// Decoded payload carried by literal tokens.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenValue {
    #[default]
    None,
    Int(IntLit),
    Float(FloatLit),
    /// Scalar value of an escape sequence.
    Char(char),
}

/// Token kinds.
///
/// Keywords are not token kinds: every keyword lexes as `Ident` and the parser
/// re-tags it as `Keyword` when it consumes it in keyword position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TokenKind {
    // Trivia
    Whitespace,
    LineComment,
    BlockComment,
    /// `@name` annotation.
    Note,

    // Names
    Ident,
    Keyword,
    /// `#name`
    Directive,
    /// `#` not followed by a name.
    Hash,

    // Literals
    Int,
    Float,
    Quote,
    StringContent,
    EscapeSequence,
    HeredocStart,
    HeredocBody,
    HeredocEnd,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Colon,
    ColonColon,
    Dot,
    DotDot,

    // Operators
    Arrow,
    FatArrow,
    Eq,
    EqEq,
    NotEq,
    TripleEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Shl,
    Shr,
    RotL,
    RotR,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    AmpTilde,
    AndAnd,
    OrOr,
    Bang,
    Dollar,
    TripleDash,

    // Compound assignment
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    ShlEq,
    ShrEq,
    RotLEq,
    RotREq,
    OrOrEq,
    AndAndEq,

    Error,
    Eof,
}

impl TokenKind {
    /// Every kind, indexed by discriminant.
    pub const ALL: [TokenKind; Self::COUNT] = [
        TokenKind::Whitespace,
        TokenKind::LineComment,
        TokenKind::BlockComment,
        TokenKind::Note,
        TokenKind::Ident,
        TokenKind::Keyword,
        TokenKind::Directive,
        TokenKind::Hash,
        TokenKind::Int,
        TokenKind::Float,
        TokenKind::Quote,
        TokenKind::StringContent,
        TokenKind::EscapeSequence,
        TokenKind::HeredocStart,
        TokenKind::HeredocBody,
        TokenKind::HeredocEnd,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::LBracket,
        TokenKind::RBracket,
        TokenKind::Comma,
        TokenKind::Semicolon,
        TokenKind::Colon,
        TokenKind::ColonColon,
        TokenKind::Dot,
        TokenKind::DotDot,
        TokenKind::Arrow,
        TokenKind::FatArrow,
        TokenKind::Eq,
        TokenKind::EqEq,
        TokenKind::NotEq,
        TokenKind::TripleEq,
        TokenKind::Lt,
        TokenKind::Gt,
        TokenKind::LtEq,
        TokenKind::GtEq,
        TokenKind::Shl,
        TokenKind::Shr,
        TokenKind::RotL,
        TokenKind::RotR,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Percent,
        TokenKind::Amp,
        TokenKind::Pipe,
        TokenKind::Caret,
        TokenKind::Tilde,
        TokenKind::AmpTilde,
        TokenKind::AndAnd,
        TokenKind::OrOr,
        TokenKind::Bang,
        TokenKind::Dollar,
        TokenKind::TripleDash,
        TokenKind::PlusEq,
        TokenKind::MinusEq,
        TokenKind::StarEq,
        TokenKind::SlashEq,
        TokenKind::PercentEq,
        TokenKind::AmpEq,
        TokenKind::PipeEq,
        TokenKind::CaretEq,
        TokenKind::ShlEq,
        TokenKind::ShrEq,
        TokenKind::RotLEq,
        TokenKind::RotREq,
        TokenKind::OrOrEq,
        TokenKind::AndAndEq,
        TokenKind::Error,
        TokenKind::Eof,
    ];

    /// Number of distinct kinds.
    pub const COUNT: usize = TokenKind::Eof as usize + 1;

    /// Index of this kind, for bitset membership.
    #[inline]
    pub const fn discriminant_index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`discriminant_index`](Self::discriminant_index).
    pub fn from_discriminant_index(index: u8) -> Option<TokenKind> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Whitespace and comments. Notes are extras too but are not trivia:
    /// the parser attaches them to the surrounding node.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    /// Tokens the parser skips over when looking for the next significant token.
    #[inline]
    pub const fn is_extra(self) -> bool {
        self.is_trivia() || matches!(self, TokenKind::Note)
    }

    /// `+=`, `<<=`, `||=` and friends.
    pub const fn is_compound_assign(self) -> bool {
        matches!(
            self,
            TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::AmpEq
                | TokenKind::PipeEq
                | TokenKind::CaretEq
                | TokenKind::ShlEq
                | TokenKind::ShrEq
                | TokenKind::RotLEq
                | TokenKind::RotREq
                | TokenKind::OrOrEq
                | TokenKind::AndAndEq
        )
    }

    /// Name used when the token appears as a named leaf in tree dumps.
    /// Punctuation, keywords and directives are anonymous.
    pub const fn leaf_name(self) -> Option<&'static str> {
        match self {
            TokenKind::Ident => Some("identifier"),
            TokenKind::LineComment => Some("comment"),
            TokenKind::BlockComment => Some("block_comment"),
            TokenKind::Note => Some("note"),
            TokenKind::StringContent => Some("string_content"),
            TokenKind::EscapeSequence => Some("escape_sequence"),
            TokenKind::HeredocStart => Some("heredoc_start"),
            TokenKind::HeredocBody => Some("heredoc_body"),
            TokenKind::HeredocEnd => Some("heredoc_end"),
            _ => None,
        }
    }

    /// Human-readable name for error messages.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::LineComment => "line comment",
            TokenKind::BlockComment => "block comment",
            TokenKind::Note => "note",
            TokenKind::Ident => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Directive => "directive",
            TokenKind::Hash => "#",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::Quote => "\"",
            TokenKind::StringContent => "string content",
            TokenKind::EscapeSequence => "escape sequence",
            TokenKind::HeredocStart => "heredoc delimiter",
            TokenKind::HeredocBody => "heredoc body",
            TokenKind::HeredocEnd => "heredoc end marker",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::ColonColon => "::",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::Arrow => "->",
            TokenKind::FatArrow => "=>",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::TripleEq => "===",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::RotL => "<<<",
            TokenKind::RotR => ">>>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::AmpTilde => "&~",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Bang => "!",
            TokenKind::Dollar => "$",
            TokenKind::TripleDash => "---",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::AmpEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::CaretEq => "^=",
            TokenKind::ShlEq => "<<=",
            TokenKind::ShrEq => ">>=",
            TokenKind::RotLEq => "<<<=",
            TokenKind::RotREq => ">>>=",
            TokenKind::OrOrEq => "||=",
            TokenKind::AndAndEq => "&&=",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A token with its span and decoded payload.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub value: TokenValue,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token {
            kind,
            span,
            value: TokenValue::None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_value(mut self, value: TokenValue) -> Self {
        self.value = value;
        self
    }

    /// Source text covered by this token.
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.text(source)
    }
}

/// Ordered tokens for one source unit, always terminated by `Eof`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Drop every token from `len` on.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.tokens.truncate(len);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Tokens that are not whitespace, comments or notes.
    pub fn significant(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| !t.kind.is_extra())
    }

    /// Concatenated text of every token, which equals the lexed source.
    pub fn text(&self, source: &str) -> String {
        self.tokens.iter().map(|t| t.text(source)).collect()
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

impl std::ops::Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests;
