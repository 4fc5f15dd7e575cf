use super::*;

#[test]
fn discriminant_round_trip() {
    for kind in TokenKind::ALL {
        assert_eq!(
            TokenKind::from_discriminant_index(kind.discriminant_index()),
            Some(kind)
        );
    }
    assert_eq!(TokenKind::from_discriminant_index(200), None);
}

#[test]
fn all_kinds_fit_in_u128_bitset() {
    assert!(TokenKind::COUNT <= 128);
}

#[test]
fn trivia_and_extras() {
    assert!(TokenKind::BlockComment.is_trivia());
    assert!(!TokenKind::Note.is_trivia());
    assert!(TokenKind::Note.is_extra());
    assert!(!TokenKind::Ident.is_extra());
}

#[test]
fn compound_assign_excludes_plain_eq() {
    assert!(TokenKind::RotLEq.is_compound_assign());
    assert!(!TokenKind::Eq.is_compound_assign());
    assert!(!TokenKind::EqEq.is_compound_assign());
}

#[test]
fn float_lit_preserves_value() {
    let lit = FloatLit::new(1.5, NumBase::Decimal);
    assert!((lit.value() - 1.5).abs() < f64::EPSILON);
}

#[test]
fn token_list_text_and_significant() {
    let source = "a  b";
    let mut list = TokenList::new();
    list.push(Token::new(TokenKind::Ident, Span::new(0, 1)));
    list.push(Token::new(TokenKind::Whitespace, Span::new(1, 3)));
    list.push(Token::new(TokenKind::Ident, Span::new(3, 4)));
    list.push(Token::new(TokenKind::Eof, Span::point(4)));

    assert_eq!(list.text(source), source);
    assert_eq!(list.significant().count(), 3);
    assert_eq!(list[2].text(source), "b");
}
