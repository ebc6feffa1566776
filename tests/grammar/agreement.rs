//! Integration tests for the grammar checker
//!
//! Tests case, number and determiner agreement in whole programs.

use germanscript_foundation::{Case, CaseSet, ErrorCategory, ErrorKind, Number, Result};
use germanscript_grammar::{Annotations, check_program};
use germanscript_language::ast::{Call, ObjectRole, Statement};
use germanscript_language::{Program, parse_text};

use crate::dictionary;

fn check(text: &str) -> Result<(Program, Annotations)> {
    let program = parse_text(text).unwrap();
    let annotations = check_program(&program, &dictionary())?;
    Ok((program, annotations))
}

fn call(program: &Program, index: usize) -> &Call {
    match &program.statements[index] {
        Statement::Call(call) => call,
        other => panic!("expected call, got {other:?}"),
    }
}

#[test]
fn accusative_object_resolves() {
    let (program, annotations) = check("pflanze den Baum\n").unwrap();
    let Some(ObjectRole::Argument(object)) = &call(&program, 0).object else {
        panic!("expected object");
    };
    let resolved = annotations.noun(&object.noun).unwrap();
    assert_eq!(resolved.cases, CaseSet::single(Case::Accusative));
    assert_eq!(resolved.number, Number::Singular);
    assert_eq!(annotations.type_name(&object.noun).unwrap(), "Baum");
}

#[test]
fn nominative_determiner_in_accusative_position() {
    let err = check("pflanze der Baum\n").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Grammar);
    assert!(matches!(
        err.kind,
        ErrorKind::WrongDeterminer { ref found, ref expected } if found == "der" && expected == "den"
    ));
    let span = err.context.unwrap().span.unwrap();
    assert_eq!((span.line(), span.column()), (1, 9));
}

#[test]
fn preposition_governs_its_arguments() {
    assert!(check("lege das Buch auf den Tisch\n").is_ok());
    assert!(check("danke dem Gärtner für das Buch\n").is_err());
    assert!(check("danke für das Buch\n").is_ok());
    let err = check("danke für dem Buch\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::WrongDeterminer { ref expected, .. } if expected == "das"));
}

#[test]
fn plural_arguments() {
    let (program, annotations) = check("lege die Bücher auf die Tische\n").unwrap();
    let call = call(&program, 0);
    let item = &call.prepositions[0].items[0];
    let resolved = annotations.noun(&item.noun).unwrap();
    assert_eq!(resolved.number, Number::Plural);
    assert_eq!(resolved.cases, CaseSet::single(Case::Accusative));
}

#[test]
fn genitive_owner_of_property() {
    assert!(check("die Zahl ist die Zahl des Baums\n").is_ok());
    assert!(check("die Zahl ist die Zahl der Bäume\n").is_ok());
    let err = check("die Zahl ist die Zahl des Baum\n").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::WrongNounForm { ref found, ref expected, .. } if found == "Baum" && expected == "Baums"
    ));
}

#[test]
fn declaration_target_is_nominative() {
    let (program, annotations) = check("der Text ist \"Hallo\"\n").unwrap();
    let Statement::Declaration(declaration) = &program.statements[0] else {
        panic!("expected declaration");
    };
    let resolved = annotations.noun(&declaration.target).unwrap();
    assert_eq!(resolved.case(), Some(Case::Nominative));
    assert!(resolved.immutable);

    let (program, annotations) = check("ein Text ist \"Hallo\"\n").unwrap();
    let Statement::Declaration(declaration) = &program.statements[0] else {
        panic!("expected declaration");
    };
    assert!(!annotations.noun(&declaration.target).unwrap().immutable);
}

#[test]
fn for_each_binder_is_singular() {
    assert!(check("für jeden Baum in den Bäumen:\n  pflanze den Baum\n.\n").is_ok());
    let err = check("für alle Bäume in den Bäumen:\n  abbrechen\n.\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::WrongNumber { .. }));
}

#[test]
fn unknown_word_stops_checking() {
    let err = check("pflanze den Baum\npflanze die Blume\npflanze der Baum\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownWord(ref word) if word == "Blume"));
    assert_eq!(err.context.unwrap().span.unwrap().line(), 2);
}
