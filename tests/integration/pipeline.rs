//! Integration tests for the compilation pipeline
//!
//! Tests configuration, imports across files and external lookups.

use std::sync::Arc;

use germanscript_compiler::{CompilerConfig, STANDARD_LIBRARY, compile};
use germanscript_declension::{Declension, MemoryService, OfflineService};
use germanscript_foundation::{ErrorCategory, ErrorKind, Gender};
use tempfile::TempDir;

use crate::{compile_text, write};

fn table() -> Declension {
    Declension::from_forms(
        Gender::Masculine,
        ["Tisch", "Tisches", "Tisch", "Tisch"],
        ["Tische", "Tische", "Tischen", "Tische"],
    )
}

#[tokio::test]
async fn standard_library_compiles_on_its_own() {
    let compiled = compile_text("").await.unwrap();
    let signatures = compiled.signatures();
    assert!(signatures.contains(&"Verb schreibe die Zeile".to_string()));
    assert!(signatures.contains(&"Verb addiere die Zahl mit der Zahl".to_string()));
    assert!(signatures.contains(&"Verb runde die Zahl ab".to_string()));
}

#[tokio::test]
async fn program_without_standard_library() {
    let dir = TempDir::new().unwrap();
    let entry = write(&dir, "main.gm", "schreibe die Zeile \"Hallo\"\n");
    let err = compile(&CompilerConfig::isolated(entry), Arc::new(OfflineService))
        .await
        .unwrap_err();
    // without the standard library "Zeile" has no declension
    assert!(matches!(err.kind, ErrorKind::UnknownWord(ref word) if word == "Zeile"));
}

#[tokio::test]
async fn imports_contribute_definitions() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "moebel.gm",
        "Deklination Maskulinum Singular(Tisch, Tisches, Tisch, Tisch) Plural(Tische, Tische, Tischen, Tische)\n\
         Verb decke den Tisch:\n  schreibe die Zeile \"gedeckt\"\n.\n",
    );
    let entry = write(&dir, "main.gm", "importiere \"moebel.gm\"\ndecke den Tisch\n");
    let config = CompilerConfig::for_entry(entry).with_source_rewrite(false);
    let compiled = compile(&config, Arc::new(OfflineService)).await.unwrap();
    assert!(compiled.signatures().contains(&"Verb decke den Tisch".to_string()));
}

#[tokio::test]
async fn importing_the_standard_library_again_is_cyclic() {
    let dir = TempDir::new().unwrap();
    let text = format!("importiere \"{STANDARD_LIBRARY}\"\n");
    let entry = write(&dir, "main.gm", &text);
    let config = CompilerConfig::for_entry(entry).with_source_rewrite(false);
    let err = compile(&config, Arc::new(OfflineService)).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Lexical);
    assert!(matches!(err.kind, ErrorKind::CyclicImport(_)));
}

#[tokio::test]
async fn external_declension_is_written_back() {
    let dir = TempDir::new().unwrap();
    let entry = write(
        &dir,
        "main.gm",
        "Deklination Duden(Tisch)\nVerb decke den Tisch:\n  intern\n.\ndecke den Tisch\n",
    );
    let service = Arc::new(MemoryService::new().with("Tisch", table()));

    compile(&CompilerConfig::for_entry(&entry), Arc::clone(&service))
        .await
        .unwrap();
    let text = std::fs::read_to_string(&entry).unwrap();
    assert!(text.starts_with(
        "Deklination Maskulinum Singular(Tisch, Tisches, Tisch, Tisch) Plural(Tische, Tische, Tischen, Tische)\n"
    ));

    // the second compilation is served from the rewritten file
    compile(&CompilerConfig::for_entry(&entry), Arc::new(OfflineService))
        .await
        .unwrap();
}

#[tokio::test]
async fn offline_lookup_reports_connectivity() {
    let err = compile_text("Deklination Duden(Tisch)\n").await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Lookup);
    assert!(matches!(err.kind, ErrorKind::NoConnectivity(ref word) if word == "Tisch"));
    assert!(err.report().contains("main.gm:1:"));
}

#[tokio::test]
async fn first_error_wins() {
    let err = compile_text("schreibe die Zahl $\nschreibe der Zahl 1\n").await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidCharacter('$')));
}

#[tokio::test]
async fn class_resolution_through_compiled_program() {
    let text = "\
Deklination Femininum Singular(Person, Person, Person, Person) Plural(Personen, Personen, Personen, Personen)

Nomen Person mit einem Namen:
  meine Zahl ist 1
.

Implementiere die Person:
  Verb stelle mich vor:
    schreibe die Zeile \"Hallo\"
  .
  Als Text:
    gebe \"Person\" zurück
  .
.

die Person ist eine Person mit dem Namen \"Ada\"
";
    let compiled = compile_text(text).await.unwrap();
    let signatures = compiled.signatures();
    let class = signatures.iter().position(|line| line == "Nomen Person").unwrap();
    assert_eq!(signatures[class + 1], "  Verb stelle sich vor");
    assert_eq!(signatures[class + 2], "  Als Text");
}
