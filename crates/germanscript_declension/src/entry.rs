//! A single declension table: gender plus eight surface forms.

use std::fmt;

use germanscript_foundation::{Case, CaseSet, Gender, Number, NumberSet};

/// The declension of one noun.
///
/// Forms are stored singular first, each number in the order nominative,
/// genitive, dative, accusative. Forms need not be distinct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declension {
    gender: Gender,
    forms: [String; 8],
}

impl Declension {
    /// Creates a declension from its singular and plural rows.
    #[must_use]
    pub fn new(gender: Gender, singular: [String; 4], plural: [String; 4]) -> Self {
        let [s0, s1, s2, s3] = singular;
        let [p0, p1, p2, p3] = plural;
        Self {
            gender,
            forms: [s0, s1, s2, s3, p0, p1, p2, p3],
        }
    }

    /// Convenience constructor from string slices.
    #[must_use]
    pub fn from_forms(gender: Gender, singular: [&str; 4], plural: [&str; 4]) -> Self {
        Self::new(
            gender,
            singular.map(String::from),
            plural.map(String::from),
        )
    }

    /// The grammatical gender.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// The nominative singular, which is the dictionary key.
    #[must_use]
    pub fn nominative(&self) -> &str {
        &self.forms[0]
    }

    /// The form for a case and number.
    #[must_use]
    pub fn form(&self, case: Case, number: Number) -> &str {
        &self.forms[number.index() * 4 + case.index()]
    }

    /// All eight forms, singular first.
    #[must_use]
    pub fn forms(&self) -> &[String; 8] {
        &self.forms
    }

    /// One row of four forms.
    #[must_use]
    pub fn row(&self, number: Number) -> &[String] {
        let start = number.index() * 4;
        &self.forms[start..start + 4]
    }

    /// True if `word` is one of the eight forms.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.forms.iter().any(|form| form == word)
    }

    /// The number a stored form index belongs to: the first four are singular.
    #[must_use]
    pub const fn number_at(index: usize) -> Number {
        if index < 4 {
            Number::Singular
        } else {
            Number::Plural
        }
    }

    /// Every number in which `word` is a valid form.
    ///
    /// "Zimmer" is both singular and plural; the set has both.
    #[must_use]
    pub fn numbers_of(&self, word: &str) -> NumberSet {
        self.forms
            .iter()
            .enumerate()
            .filter(|(_, form)| *form == word)
            .fold(NumberSet::EMPTY, |set, (index, _)| {
                set.with(Self::number_at(index))
            })
    }

    /// Every case in which `word` is the form for `number`.
    #[must_use]
    pub fn cases_of(&self, word: &str, number: Number) -> CaseSet {
        Case::ALL
            .into_iter()
            .filter(|case| self.form(*case, number) == word)
            .collect()
    }
}

/// Renders the declension as a `Deklination` statement.
impl fmt::Display for Declension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deklination {} Singular({}) Plural({})",
            self.gender,
            self.row(Number::Singular).join(", "),
            self.row(Number::Plural).join(", ")
        )
    }
}
