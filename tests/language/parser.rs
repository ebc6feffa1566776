//! Integration tests for the parser
//!
//! Tests whole programs and the structural dispatch of noun phrases.

use germanscript_foundation::ErrorKind;
use germanscript_language::ast::{Definition, Expression, ObjectRole, Statement};
use germanscript_language::{Operator, parse_text};

const PROGRAM: &str = "\
Deklination Femininum Singular(Person, Person, Person, Person) Plural(Personen, Personen, Personen, Personen)

Nomen Person mit einem Namen, einem Alter:
  meine Größe ist 1,80
.

Implementiere die Person:
  Verb grüße mich:
    schreibe die Zeile \"Hallo\"
  .
  Als Zeichenfolge:
    gebe mein Name zurück
  .
.

die Zahlen sind einige Zahlen[1, 2, 3]
für jede Zahl in den Zahlen:
  wenn die Zahl größer gleich 3:
    schreibe die Zahl
  .
  sonst:
    schreibe die Zahl (die Zahl mal 2)
  .
.
";

fn value(text: &str) -> Expression {
    let program = parse_text(&format!("der Wert ist {text}")).unwrap();
    match program.statements.into_iter().next() {
        Some(Statement::Declaration(declaration)) => declaration.value,
        other => panic!("expected declaration, got {other:?}"),
    }
}

// =============================================================================
// Programs
// =============================================================================

#[test]
fn whole_program() {
    let program = parse_text(PROGRAM).unwrap();
    assert_eq!(program.definitions.len(), 3);
    assert_eq!(program.statements.len(), 2);
    assert!(matches!(program.definitions[0], Definition::Declension(_)));
    assert!(matches!(program.definitions[1], Definition::Class(_)));
    assert!(matches!(program.definitions[2], Definition::Implementation(_)));
    assert!(matches!(program.statements[1], Statement::ForEach(_)));
}

#[test]
fn noun_phrases_have_distinct_ids() {
    let program = parse_text("die Zahl ist 1\ndie Zahl ist 2\n").unwrap();
    let ids: Vec<_> = program
        .statements
        .iter()
        .map(|statement| match statement {
            Statement::Declaration(declaration) => declaration.target.id,
            other => panic!("expected declaration, got {other:?}"),
        })
        .collect();
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn method_block_closes_with_bang() {
    let program = parse_text("der Baum:\n  wachse\n!\nschreibe den Baum\n").unwrap();
    assert!(matches!(program.statements[0], Statement::MethodBlock(_)));
    assert!(matches!(program.statements[1], Statement::Call(_)));
}

// =============================================================================
// Noun phrase dispatch
// =============================================================================

#[test]
fn noun_phrase_shapes() {
    assert!(matches!(value("die Zahl"), Expression::Variable(_)));
    assert!(matches!(value("ein Baum"), Expression::Instantiation { .. }));
    assert!(matches!(value("einige Zahlen[1, 2]"), Expression::List { .. }));
    assert!(matches!(value("die Zahlen[0]"), Expression::ListIndex { .. }));
    assert!(matches!(value("die Höhe des Baumes"), Expression::Property { .. }));
    assert!(matches!(value("die Zahl als Zeichenfolge"), Expression::Conversion { .. }));
}

#[test]
fn expression_precedence() {
    let Expression::Binary { operator, left, right, .. } = value("1 plus 2 mal 3 gleich 7") else {
        panic!("expected binary");
    };
    assert_eq!(operator, Operator::Equal);
    assert!(matches!(*right, Expression::Literal(_)));
    let Expression::Binary { operator, right, .. } = *left else {
        panic!("expected sum");
    };
    assert_eq!(operator, Operator::Plus);
    assert!(matches!(*right, Expression::Binary { operator: Operator::Times, .. }));
}

#[test]
fn call_with_prepositions_and_suffix() {
    let program = parse_text("räume das Buch mit der Hand weg\n").unwrap();
    let Statement::Call(call) = &program.statements[0] else {
        panic!("expected call");
    };
    assert!(matches!(call.object, Some(ObjectRole::Argument(_))));
    assert_eq!(call.prepositions[0].preposition.text, "mit");
    assert_eq!(call.suffix.as_ref().unwrap().text, "weg");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn syntax_error_position() {
    let err = parse_text("die Zahl ist 1\nwenn die Zahl\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnexpectedToken { .. }));
    assert_eq!(err.context.unwrap().span.unwrap().line(), 2);
}

#[test]
fn loop_control_needs_loop() {
    let err = parse_text("fortfahren\n").unwrap_err();
    assert_eq!(err.to_string(), "'fortfahren' may only be used inside a 'solange' or 'für' loop");
}

#[test]
fn intern_needs_function() {
    let err = parse_text("Nomen Baum:\n  intern\n.\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MisplacedConstruct { .. }));
}
