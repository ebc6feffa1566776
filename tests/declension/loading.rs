//! Integration tests for dictionary population
//!
//! Tests inline declarations, concurrent external lookups and source rewriting.

use std::sync::Arc;
use std::time::Duration;

use germanscript_declension::{Declension, DictionaryLoader, MemoryService, OfflineService};
use germanscript_foundation::{ErrorKind, Gender, LookupFailure};
use germanscript_language::{ImportQueue, parse_queue, parse_text};
use tempfile::TempDir;

fn table() -> Declension {
    Declension::from_forms(
        Gender::Masculine,
        ["Tisch", "Tisches", "Tisch", "Tisch"],
        ["Tische", "Tische", "Tischen", "Tische"],
    )
}

fn chair() -> Declension {
    Declension::from_forms(
        Gender::Masculine,
        ["Stuhl", "Stuhls", "Stuhl", "Stuhl"],
        ["Stühle", "Stühle", "Stühlen", "Stühle"],
    )
}

#[tokio::test]
async fn external_and_inline_entries_combine() {
    let program = parse_text(
        "Deklination Duden(Tisch)\n\
         Deklination Maskulinum Singular(Baum, Baums, Baum, Baum) Plural(Bäume, Bäume, Bäumen, Bäume)\n\
         Deklination Duden(Stuhl)\n",
    )
    .unwrap();
    let service = MemoryService::new()
        .with("Tisch", table())
        .with("Stuhl", chair())
        .with_delay(Duration::from_millis(5));

    let dictionary = DictionaryLoader::new(Arc::new(service))
        .with_source_rewrite(false)
        .load(&program)
        .await
        .unwrap();
    assert_eq!(dictionary.len(), 3);
    assert_eq!(dictionary.lookup("Stühlen").unwrap().nominative(), "Stuhl");
    assert_eq!(dictionary.lookup("Tisches").unwrap().nominative(), "Tisch");
}

#[tokio::test]
async fn first_failure_in_discovery_order_wins() {
    let program = parse_text("Deklination Duden(Tisch)\nDeklination Duden(Stuhl)\n").unwrap();
    let service = MemoryService::new()
        .failing("Tisch", LookupFailure::ServerError("503".into()))
        .failing("Stuhl", LookupFailure::NotFound("Stuhl".into()));

    let err = DictionaryLoader::new(Arc::new(service))
        .with_source_rewrite(false)
        .load(&program)
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::External(LookupFailure::ServerError(_))));
    assert_eq!(err.context.unwrap().span.unwrap().line(), 1);
}

#[tokio::test]
async fn unknown_external_word() {
    let program = parse_text("Deklination Duden(Schrank)\n").unwrap();
    let err = DictionaryLoader::new(Arc::new(MemoryService::new()))
        .load(&program)
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ExternalWordNotFound(ref word) if word == "Schrank"));
}

#[tokio::test]
async fn slow_lookup_times_out() {
    let program = parse_text("Deklination Duden(Tisch)\n").unwrap();
    let service = MemoryService::new()
        .with("Tisch", table())
        .with_delay(Duration::from_secs(5));
    let err = DictionaryLoader::new(Arc::new(service))
        .with_timeout(Duration::from_millis(20))
        .with_source_rewrite(false)
        .load(&program)
        .await
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::External(LookupFailure::Timeout(_))));
}

#[tokio::test]
async fn rewritten_source_no_longer_needs_the_service() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("moebel.gm");
    std::fs::write(&path, "// Möbel\n  Deklination Duden(Tisch)\nDeklination Duden(Stuhl)\n").unwrap();

    let program = parse_queue(ImportQueue::seeded([&path]).unwrap()).unwrap();
    let service = MemoryService::new().with("Tisch", table()).with("Stuhl", chair());
    DictionaryLoader::new(Arc::new(service))
        .load(&program)
        .await
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "// Möbel\n  Deklination Maskulinum Singular(Tisch, Tisches, Tisch, Tisch) Plural(Tische, Tische, Tischen, Tische)\n\
         Deklination Maskulinum Singular(Stuhl, Stuhls, Stuhl, Stuhl) Plural(Stühle, Stühle, Stühlen, Stühle)\n"
    );

    let program = parse_queue(ImportQueue::seeded([&path]).unwrap()).unwrap();
    let dictionary = DictionaryLoader::new(Arc::new(OfflineService))
        .load(&program)
        .await
        .unwrap();
    assert_eq!(dictionary.len(), 2);
}
