//! The side table of resolved noun phrase annotations.
//!
//! The syntax tree stays immutable after parsing; everything the grammar
//! checker learns about a noun phrase is stored here under its [`NodeId`].
//! Each entry is written once. Entries written during a failed attempt of
//! a two-way preposition are rolled back before the next case is tried.

use std::collections::HashMap;

use germanscript_foundation::{Case, CaseSet, Error, Gender, Number, Result};
use germanscript_language::{NodeId, NounPhrase};

/// What the grammar checker resolved for one noun phrase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NounAnnotation {
    /// Every case the phrase satisfies in its position.
    pub cases: CaseSet,
    /// The grammatical number.
    pub number: Number,
    /// The gender; `None` for symbols.
    pub gender: Option<Gender>,
    /// Nominative singular of the declension entry; `None` for symbols.
    pub nominative: Option<String>,
    /// The canonical spelling of the determiner, if the phrase has one.
    pub determiner: Option<String>,
    /// Declared with a definite article or without determiner.
    pub immutable: bool,
}

impl NounAnnotation {
    /// The first resolved case.
    #[must_use]
    pub fn case(&self) -> Option<Case> {
        self.cases.first()
    }

    /// True for single-letter names, which are never declined.
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        self.nominative.is_none()
    }
}

/// Position in the write journal to roll back to.
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint(usize);

/// Annotations keyed by node identity.
#[derive(Clone, Debug, Default)]
pub struct Annotations {
    nouns: HashMap<NodeId, NounAnnotation>,
    journal: Vec<NodeId>,
}

impl Annotations {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The annotation of a node, if it has been resolved.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&NounAnnotation> {
        self.nouns.get(&id)
    }

    /// The annotation of a noun phrase.
    ///
    /// # Errors
    /// Returns an internal error if the phrase was never resolved.
    pub fn noun(&self, noun: &NounPhrase) -> Result<&NounAnnotation> {
        self.get(noun.id).ok_or_else(|| {
            Error::internal(format!("'{}' was not grammar checked", noun.word()))
                .with_context(noun.context())
        })
    }

    /// The type name of a noun phrase: its nominative singular, or the
    /// word itself for symbols.
    ///
    /// # Errors
    /// Returns an internal error if the phrase was never resolved.
    pub fn type_name<'a>(&'a self, noun: &'a NounPhrase) -> Result<&'a str> {
        Ok(self.noun(noun)?.nominative.as_deref().unwrap_or(noun.word()))
    }

    /// Number of resolved phrases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nouns.len()
    }

    /// True if nothing has been resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nouns.is_empty()
    }

    /// Stores an annotation unless the node already has one, and returns
    /// the stored annotation.
    pub(crate) fn record(&mut self, id: NodeId, annotation: NounAnnotation) -> &NounAnnotation {
        let journal = &mut self.journal;
        self.nouns.entry(id).or_insert_with(|| {
            journal.push(id);
            annotation
        })
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.journal.len())
    }

    /// Forgets every annotation recorded after `checkpoint`.
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) {
        for id in self.journal.drain(checkpoint.0..) {
            self.nouns.remove(&id);
        }
    }
}
