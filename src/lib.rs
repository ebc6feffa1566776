//! GermanScript - a programming language written in German sentences
//!
//! This crate re-exports all layers of the GermanScript front end for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: germanscript_compiler    — Configuration, pipeline, CLI
//! Layer 3: germanscript_grammar     — Case agreement, canonical signatures, definitions
//! Layer 2: germanscript_declension  — Declension dictionary, external lookups
//! Layer 1: germanscript_language    — Tokenizer, syntax tree, parser
//! Layer 0: germanscript_foundation  — Errors, spans, grammatical categories
//! ```

pub use germanscript_compiler as compiler;
pub use germanscript_declension as declension;
pub use germanscript_foundation as foundation;
pub use germanscript_grammar as grammar;
pub use germanscript_language as language;
