//! Integration tests for the tokenizer
//!
//! Tests tokenization of GermanScript source lines.

use germanscript_foundation::ErrorKind;
use germanscript_language::{DeterminerKind, Keyword, Operator, TokenKind, Tokenizer};

fn kinds(text: &str) -> Vec<TokenKind> {
    Tokenizer::from_text(text)
        .tokenize_all()
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

// =============================================================================
// Lines
// =============================================================================

#[test]
fn every_line_ends_with_newline() {
    let kinds = kinds("die Zahl ist 1\n\n\nschreibe die Zahl\n");
    let newlines = kinds.iter().filter(|kind| **kind == TokenKind::NewLine).count();
    assert_eq!(newlines, 2);
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));
}

#[test]
fn function_header() {
    assert_eq!(kinds("Verb (Zahl) addiere die Zahl X:")[..8], [
        TokenKind::Keyword(Keyword::Verb),
        TokenKind::LParen,
        TokenKind::Noun("Zahl".into()),
        TokenKind::RParen,
        TokenKind::Word("addiere".into()),
        TokenKind::Determiner(DeterminerKind::Definite),
        TokenKind::Noun("Zahl".into()),
        TokenKind::Noun("X".into()),
    ]);
}

#[test]
fn word_operators() {
    assert_eq!(kinds("1 plus 2 mal 3 hoch 2")[..7], [
        TokenKind::Number(1.0),
        TokenKind::Operator(Operator::Plus),
        TokenKind::Number(2.0),
        TokenKind::Operator(Operator::Times),
        TokenKind::Number(3.0),
        TokenKind::Operator(Operator::Power),
        TokenKind::Number(2.0),
    ]);
}

#[test]
fn determiner_kinds() {
    assert_eq!(kinds("meine deine jede einige")[..4], [
        TokenKind::Determiner(DeterminerKind::FirstPossessive),
        TokenKind::Determiner(DeterminerKind::SecondPossessive),
        TokenKind::Determiner(DeterminerKind::Quantifier),
        TokenKind::Determiner(DeterminerKind::Indefinite),
    ]);
}

#[test]
fn literals() {
    assert_eq!(kinds("\"Hallo\" wahr falsch 2,5")[..4], [
        TokenKind::Text("Hallo".into()),
        TokenKind::Boolean(true),
        TokenKind::Boolean(false),
        TokenKind::Number(2.5),
    ]);
}

#[test]
fn unterminated_block_comment_swallows_rest() {
    assert_eq!(kinds("schreibe\n/* bis zum Ende\ndie Zahl ist 1\n"), vec![
        TokenKind::Word("schreibe".into()),
        TokenKind::NewLine,
        TokenKind::Eof,
    ]);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn invalid_character_position() {
    let err = Tokenizer::from_text("die Zahl ist 1\nschreibe $")
        .tokenize_all()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidCharacter('$')));
    let span = err.context.unwrap().span.unwrap();
    assert_eq!((span.line(), span.column()), (2, 10));
}

#[test]
fn unterminated_string() {
    let err = Tokenizer::from_text("schreibe die Zeile \"offen")
        .tokenize_all()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnterminatedString));
}
