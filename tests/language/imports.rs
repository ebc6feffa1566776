//! Integration tests for the import queue
//!
//! Tests reading several files through one token stream.

use std::path::{Path, PathBuf};

use germanscript_foundation::{ErrorKind, Result};
use germanscript_language::{ImportQueue, Token, TokenKind, Tokenizer, parse_queue};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn tokens_of(paths: &[&Path]) -> Result<Vec<Token>> {
    Tokenizer::new(ImportQueue::seeded(paths.iter().copied())?).tokenize_all()
}

fn words(tokens: &[Token]) -> Vec<&str> {
    tokens
        .iter()
        .filter(|token| matches!(token.kind, TokenKind::Word(_)))
        .map(|token| token.text.as_str())
        .collect()
}

#[test]
fn seeded_files_are_read_in_order() {
    let dir = TempDir::new().unwrap();
    let first = write(&dir, "erste.gm", "eins\n");
    let second = write(&dir, "zweite.gm", "zwei\n");

    let tokens = tokens_of(&[&first, &second]).unwrap();
    assert_eq!(words(&tokens), vec!["eins", "zwei"]);
    assert!(tokens[0].file.ends_with("erste.gm"));
    assert!(tokens[2].file.ends_with("zweite.gm"));
}

#[test]
fn import_is_read_after_the_importer() {
    let dir = TempDir::new().unwrap();
    write(&dir, "bibliothek.gm", "aus der bibliothek\n");
    let main = write(&dir, "main.gm", "importiere \"bibliothek.gm\"\nhaupt\n");

    let tokens = tokens_of(&[&main]).unwrap();
    // the import line itself yields no tokens
    assert_eq!(words(&tokens), vec!["haupt", "aus", "bibliothek"]);
}

#[test]
fn cyclic_import_is_an_error() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.gm", "importiere \"b.gm\"\n");
    write(&dir, "b.gm", "importiere \"a.gm\"\n");

    let err = tokens_of(&[&a]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CyclicImport(ref path) if path.ends_with("a.gm")));
    let context = err.context.unwrap();
    assert!(context.file.unwrap().ends_with("b.gm"));
}

#[test]
fn self_import_is_cyclic() {
    let dir = TempDir::new().unwrap();
    let main = write(&dir, "main.gm", "importiere \"main.gm\"\n");
    let err = parse_queue(ImportQueue::seeded([&main]).unwrap()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CyclicImport(_)));
}

#[test]
fn missing_import_is_reported() {
    let dir = TempDir::new().unwrap();
    let main = write(&dir, "main.gm", "importiere \"fehlt.gm\"\n");
    let err = tokens_of(&[&main]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SourceUnreadable { .. }));
}

#[test]
fn definitions_span_files() {
    let dir = TempDir::new().unwrap();
    write(&dir, "funktionen.gm", "Verb begrüße die Welt:\n  intern\n.\n");
    let main = write(&dir, "main.gm", "importiere \"funktionen.gm\"\nbegrüße die Welt\n");

    let program = parse_queue(ImportQueue::seeded([&main]).unwrap()).unwrap();
    assert_eq!(program.definitions.len(), 1);
    assert_eq!(program.statements.len(), 1);
}
