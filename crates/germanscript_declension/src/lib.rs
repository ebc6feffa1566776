//! Declension dictionary for GermanScript.
//!
//! This crate provides:
//! - [`Declension`] - A noun's gender and its eight inflected forms
//! - [`DeclensionDictionary`] - Sorted storage with umlaut-folding lookup
//! - [`DeclensionService`] - The external dictionary, queried concurrently
//! - [`DictionaryLoader`] - Population from a parsed program

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collation;
pub mod dictionary;
pub mod entry;
pub mod external;
pub mod loader;
pub mod rewrite;


pub use dictionary::DeclensionDictionary;
pub use entry::Declension;
pub use external::{
    DeclensionService, LookupBarrier, LookupRequest, MemoryService, OfflineService,
    ResolvedDeclension,
};
pub use loader::{DEFAULT_LOOKUP_TIMEOUT, DictionaryLoader};
pub use rewrite::rewrite_declaration;
