use super::*;

#[test]
fn test_token_predicates() {
    let pos = Position::new(2, 5);
    let semi = Token::new(TokenKind::Punctuation, ";", pos);
    assert!(semi.is_punc(';'));
    assert!(!semi.is_punc(','));
    assert!(!semi.is_op(";"));

    let strict = Token::new(TokenKind::Operator, "===", pos);
    assert!(strict.is_op("==="));
    assert!(!strict.is_op("=="));

    let kw = Token::new(TokenKind::Keyword, "let", pos);
    assert!(kw.is_keyword("let"));
    assert!(!kw.is_eof());
    assert!(Token::eof(pos).is_eof());
}

#[test]
fn test_token_display() {
    let pos = Position::START;
    assert_eq!(Token::new(TokenKind::Var, "foo", pos).to_string(), "var `foo`");
    assert_eq!(Token::new(TokenKind::Str, "a\"b", pos).to_string(), "str \"a\\\"b\"");
    assert_eq!(Token::eof(pos).to_string(), "end of input");
}

#[test]
fn test_position_display_and_order() {
    assert_eq!(Position::new(3, 14).to_string(), "3:14");
    assert!(Position::new(1, 9) < Position::new(2, 1));
    assert_eq!(Position::default(), Position::START);
}
