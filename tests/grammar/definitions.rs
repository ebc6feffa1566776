//! Integration tests for the definition tables
//!
//! Tests canonical signatures, collisions and call resolution.

use germanscript_foundation::{ErrorCategory, ErrorKind, Result};
use germanscript_grammar::{Callable, Definitions, check_program};
use germanscript_language::ast::{Definition, Statement};
use germanscript_language::{Program, parse_text};

use crate::dictionary;

fn define(text: &str) -> Result<(Program, Definitions)> {
    let program = parse_text(text).unwrap();
    let annotations = check_program(&program, &dictionary())?;
    let definitions = Definitions::define(&program, &annotations)?;
    definitions.verify_calls(&program)?;
    Ok((program, definitions))
}

fn resolved_verb_objects(program: &Program, definitions: &Definitions) -> Vec<String> {
    program
        .statements
        .iter()
        .map(|statement| {
            let Statement::Call(call) = statement else {
                panic!("expected call");
            };
            let callable = definitions.resolve_call(call).unwrap();
            let Callable::Function { definition } = callable else {
                panic!("expected function");
            };
            let Definition::Function(function) = &program.definitions[definition] else {
                panic!("expected function definition");
            };
            function.signature.parameters().next().unwrap().noun.word().to_string()
        })
        .collect()
}

#[test]
fn overloads_differ_by_object_noun() {
    let text = "\
Verb schreibe die Zahl:
  intern
.
Verb schreibe den Text:
  intern
.
schreibe den Text \"Hallo\"
schreibe die Zahl 42
";
    let (program, definitions) = define(text).unwrap();
    assert_eq!(
        definitions.function_signatures(),
        vec!["schreibe den Text", "schreibe die Zahl"]
    );
    assert_eq!(resolved_verb_objects(&program, &definitions), vec!["Text", "Zahl"]);
}

#[test]
fn case_and_number_are_part_of_the_key() {
    let text = "\
Verb lege das Buch auf den Tisch:
  intern
.
Verb lege die Bücher auf den Tisch:
  intern
.
lege das Buch auf den Tisch
lege die Bücher auf den Tisch
";
    let (_, definitions) = define(text).unwrap();
    assert_eq!(
        definitions.function_signatures(),
        vec!["lege das Buch auf den Tisch", "lege die Bücher auf den Tisch"]
    );

    // the dative reading of "auf" is a different role
    let err = define("Verb lege das Buch auf den Tisch:\n  intern\n.\nlege das Buch auf dem Tisch\n")
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UndefinedFunction(ref signature) if signature == "lege das Buch auf dem Tisch"
    ));
}

#[test]
fn variable_names_do_not_distinguish() {
    let text = "\
Verb (Zahl) addiere die Zahl X mit der Zahl Y:
  gebe X plus Y zurück
.
Verb (Zahl) addiere die Zahl A mit der Zahl B:
  gebe A plus B zurück
.
";
    let err = define(text).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Definition);
    let ErrorKind::DuplicateDefinition { ref signature, ref original, .. } = err.kind else {
        panic!("expected duplicate definition, got {err}");
    };
    assert_eq!(signature, "addiere die Zahl mit der Zahl");
    assert_eq!(original.span.unwrap().line(), 1);
    assert_eq!(err.context.unwrap().span.unwrap().line(), 4);
}

#[test]
fn return_type_does_not_distinguish() {
    let text = "\
Verb (Zahl) zähle die Bücher:
  intern
.
Verb (Text) zähle die Bücher:
  intern
.
";
    let err = define(text).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateDefinition { .. }));
}

#[test]
fn unmatched_call_names_its_signature() {
    let text = "\
Verb schreibe die Zahl:
  intern
.
schreibe den Baum
";
    let err = define(text).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Resolution);
    assert!(matches!(err.kind, ErrorKind::UndefinedFunction(ref signature) if signature == "schreibe den Baum"));
}

#[test]
fn reserved_type_names() {
    let err = define("Nomen Zeichenfolge:\n  meine Zahl ist 1\n.\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ReservedTypeName(ref name) if name == "Zeichenfolge"));
}

#[test]
fn methods_resolve_inside_implementations() {
    let text = "\
Nomen Baum:
  meine Zahl ist 1
.
Implementiere den Baum:
  Verb wachse:
    intern
  .
  Verb pflanze mich:
    wachse
  .
.
";
    let (_, definitions) = define(text).unwrap();
    let (name, class) = definitions.classes()[0];
    assert_eq!(name, "Baum");
    assert_eq!(class.method_signatures(), vec!["pflanze sich", "wachse"]);
}

#[test]
fn methods_are_not_functions() {
    let text = "\
Nomen Baum:
  meine Zahl ist 1
.
Implementiere den Baum:
  Verb wachse:
    intern
  .
.
wachse
";
    let err = define(text).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UndefinedFunction(ref signature) if signature == "wachse"));
}
