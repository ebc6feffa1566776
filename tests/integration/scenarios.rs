//! End-to-end scenarios
//!
//! Each scenario declares its own vocabulary and runs through the whole pipeline.

use germanscript_foundation::{Case, CaseSet, ErrorKind, NumberSet};
use germanscript_language::ast::{ObjectRole, Statement};

use crate::compile_text;

const TREE: &str =
    "Deklination Maskulinum Singular(Baum, Baums, Baum, Baum) Plural(Bäume, Bäume, Bäumen, Bäume)\n";

#[tokio::test]
async fn plural_form_is_found_in_dictionary() {
    let compiled = compile_text(TREE).await.unwrap();
    let entry = compiled.dictionary().lookup("Bäume").unwrap();
    assert_eq!(entry.nominative(), "Baum");
    assert_eq!(entry.numbers_of("Bäume"), NumberSet::PLURAL);
}

#[tokio::test]
async fn accusative_argument_resolves() {
    let text = format!("{TREE}Verb pflanze den Baum:\n  intern\n.\npflanze den Baum\n");
    let compiled = compile_text(&text).await.unwrap();

    let Some(Statement::Call(call)) = compiled.program().statements.first() else {
        panic!("expected call");
    };
    let Some(ObjectRole::Argument(object)) = &call.object else {
        panic!("expected object");
    };
    let resolved = compiled.annotations().noun(&object.noun).unwrap();
    assert_eq!(resolved.cases, CaseSet::single(Case::Accusative));
    assert_eq!(compiled.resolve_call(call).unwrap().signature.verb.text, "pflanze");
}

#[tokio::test]
async fn nominative_determiner_is_rejected() {
    let text = format!("{TREE}Verb pflanze den Baum:\n  intern\n.\npflanze der Baum\n");
    let err = compile_text(&text).await.unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::WrongDeterminer { ref found, ref expected } if found == "der" && expected == "den"
    ));
    assert!(err.report().ends_with("grammar error: wrong determiner 'der', expected 'den'"));
    assert!(err.report().contains("main.gm:5:9"));
}

#[tokio::test]
async fn overloads_resolve_independently() {
    let text = "\
Verb zeige die Zahl:
  schreibe die Zahl
.
Verb zeige den Text:
  schreibe den Text
.
zeige die Zahl 1
zeige den Text \"eins\"
";
    let compiled = compile_text(text).await.unwrap();
    let targets: Vec<String> = compiled
        .program()
        .statements
        .iter()
        .map(|statement| {
            let Statement::Call(call) = statement else {
                panic!("expected call");
            };
            let function = compiled.resolve_call(call).unwrap();
            let Some(ObjectRole::Argument(parameter)) = &function.signature.object else {
                panic!("expected object parameter");
            };
            parameter.noun.word().to_string()
        })
        .collect();
    assert_eq!(targets, vec!["Zahl", "Text"]);
}
