//! Integration tests for Layer 3: Grammar
//!
//! Tests for case agreement and for the definition tables.

mod agreement;
mod definitions;

use germanscript_declension::{Declension, DeclensionDictionary};
use germanscript_foundation::Gender;

/// A small vocabulary shared by the grammar tests.
pub fn dictionary() -> DeclensionDictionary {
    let mut dictionary = DeclensionDictionary::new();
    for entry in [
        Declension::from_forms(
            Gender::Masculine,
            ["Baum", "Baums", "Baum", "Baum"],
            ["Bäume", "Bäume", "Bäumen", "Bäume"],
        ),
        Declension::from_forms(
            Gender::Feminine,
            ["Zahl", "Zahl", "Zahl", "Zahl"],
            ["Zahlen", "Zahlen", "Zahlen", "Zahlen"],
        ),
        Declension::from_forms(
            Gender::Masculine,
            ["Text", "Textes", "Text", "Text"],
            ["Texte", "Texte", "Texten", "Texte"],
        ),
        Declension::from_forms(
            Gender::Neuter,
            ["Buch", "Buches", "Buch", "Buch"],
            ["Bücher", "Bücher", "Büchern", "Bücher"],
        ),
        Declension::from_forms(
            Gender::Masculine,
            ["Tisch", "Tisches", "Tisch", "Tisch"],
            ["Tische", "Tische", "Tischen", "Tische"],
        ),
        Declension::from_forms(
            Gender::Feminine,
            ["Zeichenfolge", "Zeichenfolge", "Zeichenfolge", "Zeichenfolge"],
            ["Zeichenfolgen", "Zeichenfolgen", "Zeichenfolgen", "Zeichenfolgen"],
        ),
        Declension::from_forms(
            Gender::Masculine,
            ["Gärtner", "Gärtners", "Gärtner", "Gärtner"],
            ["Gärtner", "Gärtner", "Gärtnern", "Gärtner"],
        ),
    ] {
        dictionary.insert(entry).unwrap();
    }
    dictionary
}
