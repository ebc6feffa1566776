//! Determiners and their agreement table.
//!
//! Every determiner word belongs to exactly one [`DeterminerKind`]. The
//! table below is the only source of truth for which spelling a determiner
//! takes in a given case, gender and number; the tokenizer uses it to
//! classify words and the grammar checker to validate agreement.

use std::fmt;

use germanscript_foundation::{Case, Gender, Number};

/// The kind of a determiner preceding a noun.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeterminerKind {
    /// der, die, das
    Definite,
    /// ein, eine, einige
    Indefinite,
    /// mein, meine
    FirstPossessive,
    /// dein, deine
    SecondPossessive,
    /// jeder, jede, jedes, alle
    Quantifier,
}

/// Rows are cases in declension order, columns are
/// masculine, feminine, neuter, plural.
type AgreementTable = [[&'static str; 4]; 4];

const DEFINITE: AgreementTable = [
    ["der", "die", "das", "die"],
    ["des", "der", "des", "der"],
    ["dem", "der", "dem", "den"],
    ["den", "die", "das", "die"],
];

const INDEFINITE: AgreementTable = [
    ["ein", "eine", "ein", "einige"],
    ["eines", "einer", "eines", "einiger"],
    ["einem", "einer", "einem", "einigen"],
    ["einen", "eine", "ein", "einige"],
];

const FIRST_POSSESSIVE: AgreementTable = [
    ["mein", "meine", "mein", "meine"],
    ["meines", "meiner", "meines", "meiner"],
    ["meinem", "meiner", "meinem", "meinen"],
    ["meinen", "meine", "mein", "meine"],
];

const SECOND_POSSESSIVE: AgreementTable = [
    ["dein", "deine", "dein", "deine"],
    ["deines", "deiner", "deines", "deiner"],
    ["deinem", "deiner", "deinem", "deinen"],
    ["deinen", "deine", "dein", "deine"],
];

const QUANTIFIER: AgreementTable = [
    ["jeder", "jede", "jedes", "alle"],
    ["jedes", "jeder", "jedes", "aller"],
    ["jedem", "jeder", "jedem", "allen"],
    ["jeden", "jede", "jedes", "alle"],
];

impl DeterminerKind {
    /// All determiner kinds.
    pub const ALL: [DeterminerKind; 5] = [
        DeterminerKind::Definite,
        DeterminerKind::Indefinite,
        DeterminerKind::FirstPossessive,
        DeterminerKind::SecondPossessive,
        DeterminerKind::Quantifier,
    ];

    const fn table(self) -> &'static AgreementTable {
        match self {
            Self::Definite => &DEFINITE,
            Self::Indefinite => &INDEFINITE,
            Self::FirstPossessive => &FIRST_POSSESSIVE,
            Self::SecondPossessive => &SECOND_POSSESSIVE,
            Self::Quantifier => &QUANTIFIER,
        }
    }

    /// Returns the spelling of this determiner for a case, gender and number.
    #[must_use]
    pub const fn form(self, case: Case, gender: Gender, number: Number) -> &'static str {
        self.table()[case.index()][gender.column(number)]
    }

    /// Classifies a word as a determiner, if it is one.
    #[must_use]
    pub fn classify(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            kind.table()
                .iter()
                .any(|row| row.iter().any(|form| *form == word))
        })
    }

    /// Returns true if `word` can introduce a genitive owner after a noun,
    /// as in "der Name *des* Baumes" or "die Farbe *meiner* Blume".
    #[must_use]
    pub fn is_genitive_continuation(word: &str) -> bool {
        [Self::Definite, Self::Indefinite, Self::FirstPossessive, Self::SecondPossessive]
            .into_iter()
            .any(|kind| kind.table()[Case::Genitive.index()].contains(&word))
    }

    /// Returns true for determiners that make a declared variable immutable.
    #[must_use]
    pub const fn makes_immutable(self) -> bool {
        matches!(self, Self::Definite)
    }
}

impl fmt::Display for DeterminerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Definite => "definite article",
            Self::Indefinite => "indefinite article",
            Self::FirstPossessive => "first-person possessive",
            Self::SecondPossessive => "second-person possessive",
            Self::Quantifier => "quantifier",
        })
    }
}
