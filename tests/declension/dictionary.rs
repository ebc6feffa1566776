//! Integration tests for the declension dictionary
//!
//! Tests lookup by any form across a realistic vocabulary.

use germanscript_declension::{Declension, DeclensionDictionary};
use germanscript_foundation::{Case, ErrorKind, Gender, Number, NumberSet};
use proptest::prelude::*;

fn vocabulary() -> Vec<Declension> {
    vec![
        Declension::from_forms(
            Gender::Masculine,
            ["Baum", "Baums", "Baum", "Baum"],
            ["Bäume", "Bäume", "Bäumen", "Bäume"],
        ),
        Declension::from_forms(
            Gender::Neuter,
            ["Baumhaus", "Baumhauses", "Baumhaus", "Baumhaus"],
            ["Baumhäuser", "Baumhäuser", "Baumhäusern", "Baumhäuser"],
        ),
        Declension::from_forms(
            Gender::Feminine,
            ["Zahl", "Zahl", "Zahl", "Zahl"],
            ["Zahlen", "Zahlen", "Zahlen", "Zahlen"],
        ),
        Declension::from_forms(
            Gender::Masculine,
            ["Name", "Namens", "Namen", "Namen"],
            ["Namen", "Namen", "Namen", "Namen"],
        ),
        Declension::from_forms(
            Gender::Neuter,
            ["Zimmer", "Zimmers", "Zimmer", "Zimmer"],
            ["Zimmer", "Zimmer", "Zimmern", "Zimmer"],
        ),
        Declension::from_forms(
            Gender::Feminine,
            ["Größe", "Größe", "Größe", "Größe"],
            ["Größen", "Größen", "Größen", "Größen"],
        ),
        Declension::from_forms(
            Gender::Masculine,
            ["Apfel", "Apfels", "Apfel", "Apfel"],
            ["Äpfel", "Äpfel", "Äpfeln", "Äpfel"],
        ),
    ]
}

fn dictionary_of(entries: Vec<Declension>) -> DeclensionDictionary {
    let mut dictionary = DeclensionDictionary::new();
    for entry in entries {
        dictionary.insert(entry).unwrap();
    }
    dictionary
}

#[test]
fn plural_form_finds_entry() {
    let dictionary = dictionary_of(vocabulary());
    let entry = dictionary.lookup("Bäume").unwrap();
    assert_eq!(entry.nominative(), "Baum");
    assert_eq!(entry.numbers_of("Bäume"), NumberSet::PLURAL);
}

#[test]
fn umlaut_sorts_with_its_base_letter() {
    let dictionary = dictionary_of(vocabulary());
    let keys: Vec<_> = dictionary.iter().map(Declension::nominative).collect();
    assert_eq!(keys, ["Apfel", "Baum", "Baumhaus", "Größe", "Name", "Zahl", "Zimmer"]);
    assert_eq!(dictionary.lookup("Äpfeln").unwrap().nominative(), "Apfel");
}

#[test]
fn form_shared_by_both_numbers() {
    let dictionary = dictionary_of(vocabulary());
    let entry = dictionary.lookup("Zimmer").unwrap();
    assert_eq!(entry.numbers_of("Zimmer"), NumberSet::ALL);
    assert_eq!(entry.form(Case::Dative, Number::Plural), "Zimmern");
}

#[test]
fn unknown_word() {
    let dictionary = dictionary_of(vocabulary());
    let err = dictionary.lookup("Baumstamm").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownWord(ref word) if word == "Baumstamm"));
}

#[test]
fn duplicate_leaves_dictionary_unchanged() {
    let mut dictionary = dictionary_of(vocabulary());
    let before: Vec<_> = dictionary.iter().cloned().collect();
    let err = dictionary
        .insert(Declension::from_forms(
            Gender::Neuter,
            ["Baum", "Baumes", "Baum", "Baum"],
            ["Baume", "Baume", "Baumen", "Baume"],
        ))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateDeclension(_)));
    let after: Vec<_> = dictionary.iter().cloned().collect();
    assert_eq!(before, after);
}

proptest! {
    #[test]
    fn insertion_order_does_not_matter(order in Just((0..7).collect::<Vec<usize>>()).prop_shuffle()) {
        let entries = vocabulary();
        let shuffled: Vec<_> = order.iter().map(|&index| entries[index].clone()).collect();
        let dictionary = dictionary_of(shuffled);

        for entry in &entries {
            for form in entry.forms() {
                prop_assert_eq!(dictionary.lookup(form).unwrap(), entry);
            }
        }
    }
}
