use jai_diagnostic::ErrorCode;
use jai_ir::{NumBase, Span, TokenKind, TokenValue};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

/// Kinds and texts of every token except `Eof`.
fn kinds_and_text(source: &str) -> Vec<(TokenKind, &str)> {
    let output = lex(source);
    output
        .tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| (t.kind, t.text(source)))
        .collect()
}

/// Kinds of the significant tokens, `Eof` included.
fn significant(source: &str) -> Vec<TokenKind> {
    lex(source).tokens.significant().map(|t| t.kind).collect()
}

fn codes(source: &str) -> Vec<ErrorCode> {
    lex(source).errors.iter().map(LexError::code).collect()
}

#[test]
fn variable_declaration() {
    assert_eq!(
        kinds_and_text("x := 42;"),
        vec![
            (TokenKind::Ident, "x"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Colon, ":"),
            (TokenKind::Eq, "="),
            (TokenKind::Whitespace, " "),
            (TokenKind::Int, "42"),
            (TokenKind::Semicolon, ";"),
        ]
    );
}

#[test]
fn eof_is_last_and_zero_width() {
    let output = lex("a");
    let last = output.tokens.as_slice().last().copied();
    assert_eq!(last.map(|t| (t.kind, t.span)), Some((TokenKind::Eof, Span::point(1))));
    assert_eq!(lex("").tokens.len(), 1);
}

#[test]
fn keywords_are_identifiers() {
    assert_eq!(
        significant("if while struct xx cast"),
        vec![
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unicode_identifiers() {
    assert_eq!(
        kinds_and_text("größe _x1"),
        vec![
            (TokenKind::Ident, "größe"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Ident, "_x1"),
        ]
    );
}

#[test]
fn longest_match_operators() {
    assert_eq!(
        significant(":: ... === <<<= >>> &~ --- ||= -> =>"),
        vec![
            TokenKind::ColonColon,
            TokenKind::DotDot,
            TokenKind::Dot,
            TokenKind::TripleEq,
            TokenKind::RotLEq,
            TokenKind::RotR,
            TokenKind::AmpTilde,
            TokenKind::TripleDash,
            TokenKind::OrOrEq,
            TokenKind::Arrow,
            TokenKind::FatArrow,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn directives_notes_and_hash() {
    assert_eq!(
        kinds_and_text("#import @note # x"),
        vec![
            (TokenKind::Directive, "#import"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Note, "@note"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Hash, "#"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Ident, "x"),
        ]
    );
}

#[test]
fn integer_literals() {
    let output = lex("1_000 0b101 0o17 0xFF");
    let values: Vec<_> = output
        .tokens
        .significant()
        .filter_map(|t| match t.value {
            TokenValue::Int(lit) => Some((lit.value, lit.base)),
            _ => None,
        })
        .collect();
    assert_eq!(
        values,
        vec![
            (1000, NumBase::Decimal),
            (5, NumBase::Binary),
            (15, NumBase::Octal),
            (255, NumBase::Hex),
        ]
    );
}

#[test]
fn range_is_not_a_float() {
    assert_eq!(
        significant("1..10"),
        vec![TokenKind::Int, TokenKind::DotDot, TokenKind::Int, TokenKind::Eof]
    );
    assert!(codes("1..10").is_empty());
    assert_eq!(
        kinds_and_text("0x10..0x1F"),
        vec![
            (TokenKind::Int, "0x10"),
            (TokenKind::DotDot, ".."),
            (TokenKind::Int, "0x1F"),
        ]
    );
}

#[test]
fn dot_without_digit_ends_the_number() {
    assert_eq!(
        kinds_and_text("1.x 2e"),
        vec![
            (TokenKind::Int, "1"),
            (TokenKind::Dot, "."),
            (TokenKind::Ident, "x"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Int, "2"),
            (TokenKind::Ident, "e"),
        ]
    );
    assert_eq!(
        kinds_and_text("1_0.2_5e+1_0"),
        vec![(TokenKind::Float, "1_0.2_5e+1_0")]
    );
}

#[test]
fn float_literals() {
    assert_eq!(
        significant("1.5 2e10 0h3f800000 0x1.8p1 1.0e-3"),
        vec![
            TokenKind::Float,
            TokenKind::Float,
            TokenKind::Float,
            TokenKind::Float,
            TokenKind::Float,
            TokenKind::Eof,
        ]
    );
    let output = lex("0x1.8p1");
    assert_eq!(
        output.tokens[0].value,
        TokenValue::Float(jai_ir::FloatLit::new(3.0, NumBase::Hex))
    );
}

#[test]
fn integer_overflow_keeps_token() {
    let output = lex("99999999999999999999999");
    assert_eq!(output.tokens[0].kind, TokenKind::Int);
    assert_eq!(codes("99999999999999999999999"), vec![ErrorCode::E0003]);
}

#[test]
fn string_pieces() {
    assert_eq!(
        kinds_and_text(r#""a\tb""#),
        vec![
            (TokenKind::Quote, "\""),
            (TokenKind::StringContent, "a"),
            (TokenKind::EscapeSequence, "\\t"),
            (TokenKind::StringContent, "b"),
            (TokenKind::Quote, "\""),
        ]
    );
    let output = lex(r#""\x41""#);
    assert_eq!(output.tokens[1].value, TokenValue::Char('A'));
}

#[test]
fn char_modifier_is_a_directive() {
    assert_eq!(
        significant("#char \"a\""),
        vec![
            TokenKind::Directive,
            TokenKind::Quote,
            TokenKind::StringContent,
            TokenKind::Quote,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn invalid_escape_reports_and_keeps_token() {
    let source = r#""\xZZ""#;
    assert_eq!(codes(source), vec![ErrorCode::E0005]);
    assert_eq!(
        kinds_and_text(source),
        vec![
            (TokenKind::Quote, "\""),
            (TokenKind::EscapeSequence, "\\x"),
            (TokenKind::StringContent, "ZZ"),
            (TokenKind::Quote, "\""),
        ]
    );
}

#[test]
fn unterminated_string_spans_to_eof() {
    let source = "x := \"abc\\n";
    let output = lex(source);
    assert_eq!(codes(source), vec![ErrorCode::E0001]);
    assert_eq!(output.errors[0].span, Span::new(5, 11));
    assert_eq!(
        kinds_and_text(source).last().copied(),
        Some((TokenKind::Error, "\"abc\\n"))
    );
}

#[test]
fn nested_block_comment_is_one_token() {
    let source = "/* a /* b */ c */";
    assert_eq!(kinds_and_text(source), vec![(TokenKind::BlockComment, source)]);
}

#[test]
fn unterminated_block_comment() {
    let source = "x /* a /* b */";
    assert_eq!(codes(source), vec![ErrorCode::E0004]);
    assert_eq!(
        lex(source).errors[0].kind,
        LexErrorKind::UnterminatedBlockComment { depth: 1 }
    );
    assert_eq!(
        kinds_and_text(source).last().copied(),
        Some((TokenKind::Error, "/* a /* b */"))
    );
}

#[test]
fn line_comment_stops_before_newline() {
    assert_eq!(
        kinds_and_text("// hi\nx"),
        vec![
            (TokenKind::LineComment, "// hi"),
            (TokenKind::Whitespace, "\n"),
            (TokenKind::Ident, "x"),
        ]
    );
}

#[test]
fn line_comment_continues_after_backslash_newline() {
    assert_eq!(
        kinds_and_text("// a \\\n b\nc"),
        vec![
            (TokenKind::LineComment, "// a \\\n b"),
            (TokenKind::Whitespace, "\n"),
            (TokenKind::Ident, "c"),
        ]
    );
}

#[test]
fn slash_is_still_division() {
    assert_eq!(
        significant("a / b /= c"),
        vec![
            TokenKind::Ident,
            TokenKind::Slash,
            TokenKind::Ident,
            TokenKind::SlashEq,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn line_continuation_is_whitespace() {
    assert_eq!(
        kinds_and_text("a \\\n b"),
        vec![
            (TokenKind::Ident, "a"),
            (TokenKind::Whitespace, " \\\n "),
            (TokenKind::Ident, "b"),
        ]
    );
}

#[test]
fn heredoc_tokens() {
    let source = "s := #string END\nhello\n  END;";
    assert_eq!(
        kinds_and_text(source),
        vec![
            (TokenKind::Ident, "s"),
            (TokenKind::Whitespace, " "),
            (TokenKind::Colon, ":"),
            (TokenKind::Eq, "="),
            (TokenKind::Whitespace, " "),
            (TokenKind::Directive, "#string"),
            (TokenKind::Whitespace, " "),
            (TokenKind::HeredocStart, "END"),
            (TokenKind::HeredocBody, "\nhello\n  "),
            (TokenKind::HeredocEnd, "END"),
            (TokenKind::Semicolon, ";"),
        ]
    );
    assert!(lex(source).errors.is_empty());
}

#[test]
fn heredoc_text_strips_framing() {
    let source = "#string END\n  line one\n  line two\n  END";
    let output = lex(source);
    let body = output
        .tokens
        .iter()
        .find(|t| t.kind == TokenKind::HeredocBody)
        .map(|t| t.span);
    assert_eq!(
        body.map(|span| heredoc_text(source, span)),
        Some("  line one\n  line two")
    );
}

#[test]
fn heredoc_delimiter_can_contain_punctuation() {
    let source = "#string _END_\n/* not a comment \"\n_END_";
    assert!(lex(source).errors.is_empty());
    assert_eq!(
        significant(source),
        vec![
            TokenKind::Directive,
            TokenKind::HeredocStart,
            TokenKind::HeredocBody,
            TokenKind::HeredocEnd,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unterminated_heredoc() {
    let source = "#string END\nnever ends";
    assert_eq!(codes(source), vec![ErrorCode::E0006]);
    assert_eq!(lex(source).errors[0].span, Span::new(8, 22));
}

#[test]
fn heredoc_without_delimiter() {
    let source = "#string\nx";
    assert_eq!(codes(source), vec![ErrorCode::E0007]);
    assert_eq!(
        significant(source),
        vec![TokenKind::Directive, TokenKind::Ident, TokenKind::Eof]
    );
}

#[test]
fn unknown_characters_become_error_tokens() {
    let source = "a ` b";
    assert_eq!(codes(source), vec![ErrorCode::E0002]);
    assert_eq!(
        significant(source),
        vec![TokenKind::Ident, TokenKind::Error, TokenKind::Ident, TokenKind::Eof]
    );
}

proptest! {
    #[test]
    fn tokens_cover_source(source in "[a-z0-9 \n\"\\\\/*#@.:;=<>{}()\\[\\]`$-]{0,64}") {
        let output = lex(&source);
        prop_assert_eq!(output.tokens.text(&source), source.clone());

        let mut offset = 0;
        for token in &output.tokens {
            prop_assert_eq!(token.span.start, offset);
            offset = token.span.end;
        }
        prop_assert_eq!(offset as usize, source.len());
    }

    #[test]
    fn heredocs_cover_source(body in "[a-zE \n]{0,40}") {
        let source = format!("#string END\n{body}");
        let output = lex(&source);
        prop_assert_eq!(output.tokens.text(&source), source.clone());
    }

    #[test]
    fn lexing_is_deterministic(source in "\\PC{0,48}") {
        prop_assert_eq!(lex(&source), lex(&source));
    }
}
