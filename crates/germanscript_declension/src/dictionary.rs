//! The ordered declension dictionary.
//!
//! Entries are kept sorted by nominative singular under
//! [`collation::compare`]. Lookup of an inflected form binary-searches with
//! the prefix-limited comparator and confirms membership among the eight
//! forms of the candidate. A miss narrows to the entries that agree with
//! the word on their shared folded prefix and checks those.

use std::cmp::Ordering;

use germanscript_foundation::{Error, ErrorKind, Result};
use tracing::trace;

use crate::collation;
use crate::entry::Declension;

/// Sorted collection of declensions, keyed by nominative singular.
#[derive(Clone, Debug, Default)]
pub struct DeclensionDictionary {
    entries: Vec<Declension>,
}

impl DeclensionDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entry has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in dictionary order.
    pub fn iter(&self) -> impl Iterator<Item = &Declension> {
        self.entries.iter()
    }

    /// Inserts an entry, keeping the dictionary sorted.
    ///
    /// # Errors
    /// Returns `DuplicateDeclension` if an entry with the same nominative
    /// singular exists. The dictionary is left unchanged.
    pub fn insert(&mut self, entry: Declension) -> Result<()> {
        match self
            .entries
            .binary_search_by(|probe| collation::compare(probe.nominative(), entry.nominative()))
        {
            Ok(_) => Err(Error::new(ErrorKind::DuplicateDeclension(
                entry.nominative().to_string(),
            ))),
            Err(index) => {
                trace!(word = entry.nominative(), index, "inserting declension");
                self.entries.insert(index, entry);
                Ok(())
            }
        }
    }

    /// Finds the entry by its exact nominative singular.
    #[must_use]
    pub fn get(&self, nominative: &str) -> Option<&Declension> {
        self.entries
            .binary_search_by(|probe| collation::compare(probe.nominative(), nominative))
            .ok()
            .map(|index| &self.entries[index])
    }

    /// Finds the entry one of whose eight forms is `word`.
    ///
    /// # Errors
    /// Returns `UnknownWord` if no entry has `word` among its forms.
    pub fn lookup(&self, word: &str) -> Result<&Declension> {
        self.search(word)
            .or_else(|| self.search_extensions(word))
            .or_else(|| self.search_stems(word))
            .ok_or_else(|| Error::new(ErrorKind::UnknownWord(word.to_string())))
    }

    /// Binary search over a half-open range that shrinks on every step.
    ///
    /// When the prefix matches but the word is not a member, the range is
    /// narrowed towards the side the full comparator points to.
    fn search(&self, word: &str) -> Option<&Declension> {
        let (mut low, mut high) = (0, self.entries.len());
        while low < high {
            let middle = low + (high - low) / 2;
            let entry = &self.entries[middle];
            let direction = match collation::compare_prefix(word, entry.nominative()) {
                Ordering::Equal if entry.contains(word) => return Some(entry),
                Ordering::Equal => collation::compare(word, entry.nominative()),
                unequal => unequal,
            };
            if direction == Ordering::Less {
                high = middle;
            } else {
                low = middle + 1;
            }
        }
        None
    }

    /// Narrows to the entries whose nominative starts with `word` ("Xyz" of
    /// "Xyzad") and checks each of them.
    fn search_extensions(&self, word: &str) -> Option<&Declension> {
        let start = self.entries.partition_point(|entry| {
            collation::compare_folded(entry.nominative(), word) == Ordering::Less
        });
        let length = self.entries[start..]
            .partition_point(|entry| collation::starts_with_folded(entry.nominative(), word));
        self.entries[start..start + length]
            .iter()
            .find(|entry| entry.contains(word))
    }

    /// Narrows to the entries whose nominative is a prefix of `word`
    /// ("Baum" of "Baumes"), longest prefix first.
    fn search_stems(&self, word: &str) -> Option<&Declension> {
        let boundaries: Vec<usize> = word
            .char_indices()
            .map(|(index, _)| index)
            .skip(1)
            .collect();

        boundaries.into_iter().rev().find_map(|end| {
            let stem = &word[..end];
            let start = self.entries.partition_point(|entry| {
                collation::compare_folded(entry.nominative(), stem) == Ordering::Less
            });
            self.entries[start..]
                .iter()
                .take_while(|entry| collation::folded_eq(entry.nominative(), stem))
                .find(|entry| entry.contains(word))
        })
    }
}
