//! Prepositions and the cases they govern.
//!
//! Two-way prepositions list Dative before Accusative; the checker tries
//! the cases in this order. `durch` is missing on purpose: it is always
//! read as the division operator.

use germanscript_foundation::Case;

const ACCUSATIVE: &[Case] = &[Case::Accusative];
const DATIVE: &[Case] = &[Case::Dative];
const GENITIVE: &[Case] = &[Case::Genitive];
const TWO_WAY: &[Case] = &[Case::Dative, Case::Accusative];

const PREPOSITIONS: &[(&str, &[Case])] = &[
    ("für", ACCUSATIVE),
    ("um", ACCUSATIVE),
    ("gegen", ACCUSATIVE),
    ("ohne", ACCUSATIVE),
    ("bis", ACCUSATIVE),
    ("mit", DATIVE),
    ("nach", DATIVE),
    ("aus", DATIVE),
    ("zu", DATIVE),
    ("von", DATIVE),
    ("bei", DATIVE),
    ("seit", DATIVE),
    ("außer", DATIVE),
    ("gegenüber", DATIVE),
    ("in", TWO_WAY),
    ("an", TWO_WAY),
    ("auf", TWO_WAY),
    ("über", TWO_WAY),
    ("unter", TWO_WAY),
    ("vor", TWO_WAY),
    ("hinter", TWO_WAY),
    ("neben", TWO_WAY),
    ("zwischen", TWO_WAY),
    ("wegen", GENITIVE),
    ("während", GENITIVE),
    ("trotz", GENITIVE),
    ("statt", GENITIVE),
];

/// The candidate cases of a preposition, in the order they are tried.
#[must_use]
pub fn cases(preposition: &str) -> Option<&'static [Case]> {
    PREPOSITIONS
        .iter()
        .find(|(word, _)| *word == preposition)
        .map(|(_, cases)| *cases)
}

/// True if `word` is a known preposition.
#[must_use]
pub fn is_preposition(word: &str) -> bool {
    cases(word).is_some()
}
