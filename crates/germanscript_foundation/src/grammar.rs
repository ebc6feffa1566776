//! Grammatical categories shared by every pipeline stage.
//!
//! Cases and numbers are usually handled as small sets: a surface form can
//! satisfy several cases at once ("Baum" is nominative, dative and
//! accusative singular), and syntactic positions accept more than one.

use std::fmt;

/// Grammatical case (Kasus).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Case {
    /// Nominativ - subject position.
    Nominative,
    /// Genitiv - possessor position.
    Genitive,
    /// Dativ - indirect object, most prepositions.
    Dative,
    /// Akkusativ - direct object.
    Accusative,
}

impl Case {
    /// All cases in declension-table order.
    pub const ALL: [Case; 4] = [
        Case::Nominative,
        Case::Genitive,
        Case::Dative,
        Case::Accusative,
    ];

    /// Index of this case in a declension table row.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Nominative => 0,
            Self::Genitive => 1,
            Self::Dative => 2,
            Self::Accusative => 3,
        }
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nominative => "Nominativ",
            Self::Genitive => "Genitiv",
            Self::Dative => "Dativ",
            Self::Accusative => "Akkusativ",
        })
    }
}

/// Grammatical number (Numerus).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Number {
    /// One thing.
    Singular,
    /// Several things.
    Plural,
}

impl Number {
    /// Both numbers, singular first.
    pub const ALL: [Number; 2] = [Number::Singular, Number::Plural];

    /// Index of this number in a declension table (singular forms come first).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Singular => 0,
            Self::Plural => 1,
        }
    }

    /// The verb form a declaration uses for this number.
    #[must_use]
    pub const fn assignment_verb(self) -> &'static str {
        match self {
            Self::Singular => "ist",
            Self::Plural => "sind",
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Singular => "Singular",
            Self::Plural => "Plural",
        })
    }
}

/// Grammatical gender (Genus).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Maskulinum.
    Masculine,
    /// Femininum.
    Feminine,
    /// Neutrum.
    Neuter,
}

impl Gender {
    /// Parses the keyword used in declension declarations.
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "Maskulinum" => Some(Self::Masculine),
            "Femininum" => Some(Self::Feminine),
            "Neutrum" => Some(Self::Neuter),
            _ => None,
        }
    }

    /// The keyword used in declension declarations.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Masculine => "Maskulinum",
            Self::Feminine => "Femininum",
            Self::Neuter => "Neutrum",
        }
    }

    /// Column of a determiner table for this gender and number.
    ///
    /// Plural forms share one column regardless of gender.
    #[must_use]
    pub const fn column(self, number: Number) -> usize {
        match (number, self) {
            (Number::Plural, _) => 3,
            (Number::Singular, Self::Masculine) => 0,
            (Number::Singular, Self::Feminine) => 1,
            (Number::Singular, Self::Neuter) => 2,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A set of cases.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CaseSet(u8);

impl CaseSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);
    /// Every case.
    pub const ALL: Self = Self(0b1111);

    /// Creates a set containing exactly one case.
    #[must_use]
    pub const fn single(case: Case) -> Self {
        Self(case.bit())
    }

    /// Creates a set from a slice of cases.
    #[must_use]
    pub fn of(cases: &[Case]) -> Self {
        cases.iter().fold(Self::EMPTY, |set, &case| set.with(case))
    }

    /// Returns this set with `case` added.
    #[must_use]
    pub const fn with(self, case: Case) -> Self {
        Self(self.0 | case.bit())
    }

    /// Returns true if `case` is in the set.
    #[must_use]
    pub const fn contains(self, case: Case) -> bool {
        self.0 & case.bit() != 0
    }

    /// Returns the cases present in both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns true if the set has no cases.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of cases in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns the first case in declension-table order.
    #[must_use]
    pub fn first(self) -> Option<Case> {
        self.iter().next()
    }

    /// Iterates the cases in declension-table order.
    pub fn iter(self) -> impl Iterator<Item = Case> {
        Case::ALL.into_iter().filter(move |case| self.contains(*case))
    }
}

impl FromIterator<Case> for CaseSet {
    fn from_iter<I: IntoIterator<Item = Case>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for CaseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for CaseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|case| case.to_string()).collect();
        f.write_str(&names.join("/"))
    }
}

/// A set of grammatical numbers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NumberSet(u8);

impl NumberSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);
    /// Singular and plural.
    pub const ALL: Self = Self(0b11);
    /// Singular only.
    pub const SINGULAR: Self = Self(0b01);
    /// Plural only.
    pub const PLURAL: Self = Self(0b10);

    /// Creates a set containing exactly one number.
    #[must_use]
    pub const fn single(number: Number) -> Self {
        Self(1 << number.index())
    }

    /// Returns this set with `number` added.
    #[must_use]
    pub const fn with(self, number: Number) -> Self {
        Self(self.0 | 1 << number.index())
    }

    /// Returns true if `number` is in the set.
    #[must_use]
    pub const fn contains(self, number: Number) -> bool {
        self.0 & (1 << number.index()) != 0
    }

    /// Returns the numbers present in both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the numbers, singular first.
    pub fn iter(self) -> impl Iterator<Item = Number> {
        Number::ALL
            .into_iter()
            .filter(move |number| self.contains(*number))
    }
}

impl fmt::Debug for NumberSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
