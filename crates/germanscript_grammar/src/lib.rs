//! Grammar checking and definition tables for GermanScript.
//!
//! This crate provides:
//! - [`GrammarChecker`] - Case, number and determiner agreement for every noun phrase
//! - [`Annotations`] - The side table of resolved noun phrases
//! - [`Definitions`] - Canonical signatures and resolution of calls and types
//! - [`prepositions`] - The cases each preposition governs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod annotations;
pub mod checker;
pub mod definer;
pub mod prepositions;
pub mod signature;


pub use annotations::{Annotations, NounAnnotation};
pub use checker::{GrammarChecker, check_program};
pub use definer::{Callable, ClassEntry, ConversionRef, Definitions, RESERVED_TYPE_NAMES};
pub use germanscript_language::DeterminerKind;
