use pretty_assertions::assert_eq;
use tao_ir::{Name, Span, TokenKind};

use super::{lex, LexError};

fn kinds(source: &str) -> Vec<TokenKind> {
    match lex(source) {
        Ok(tokens) => tokens.kinds(),
        Err(err) => panic!("lex failed: {err}"),
    }
}

#[test]
fn test_lex_var_definition() {
    assert_eq!(
        kinds("var x = 42;"),
        vec![
            TokenKind::Var,
            TokenKind::Ident(Name::new("x")),
            TokenKind::Assign,
            TokenKind::Number(42),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_keywords_vs_identifiers() {
    assert_eq!(
        kinds("function functional nil nile"),
        vec![
            TokenKind::Function,
            TokenKind::Ident(Name::new("functional")),
            TokenKind::Nil,
            TokenKind::Ident(Name::new("nile")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_longest_operator_wins() {
    assert_eq!(
        kinds("a ** b &^ c <= d >> e => f ++ --"),
        vec![
            TokenKind::Ident(Name::new("a")),
            TokenKind::StarStar,
            TokenKind::Ident(Name::new("b")),
            TokenKind::AmpCaret,
            TokenKind::Ident(Name::new("c")),
            TokenKind::LtEq,
            TokenKind::Ident(Name::new("d")),
            TokenKind::Shr,
            TokenKind::Ident(Name::new("e")),
            TokenKind::Arrow,
            TokenKind::Ident(Name::new("f")),
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_string_escapes() {
    assert_eq!(
        kinds(r#""a\"b\n""#),
        vec![TokenKind::String("a\"b\n".to_string()), TokenKind::Eof]
    );
}

#[test]
fn test_lex_skips_comments_and_newlines() {
    assert_eq!(
        kinds("x // comment\n;"),
        vec![
            TokenKind::Ident(Name::new("x")),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_lex_spans() {
    let tokens = match lex("var  abc") {
        Ok(tokens) => tokens,
        Err(err) => panic!("lex failed: {err}"),
    };
    let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(spans, vec![Span::new(0, 3), Span::new(5, 8), Span::new(8, 8)]);
}

#[test]
fn test_lex_invalid_token() {
    assert_eq!(lex("x @ y"), Err(LexError::InvalidToken { span: Span::new(2, 3) }));
}

#[test]
fn test_lex_invalid_escape() {
    assert_eq!(
        lex(r#""ab\q""#),
        Err(LexError::InvalidEscape { span: Span::new(3, 5) })
    );
}

#[test]
fn test_lex_number_out_of_range() {
    let err = lex("99999999999999999999").err();
    assert_eq!(err.map(|e| e.span()), Some(Span::new(0, 20)));
}

#[test]
fn test_lex_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}
