//! Tokenizer, syntax tree and parser for GermanScript.
//!
//! This crate provides:
//! - [`Tokenizer`] - Lazy, line-based tokenization across an [`ImportQueue`]
//! - [`Parser`] - Recursive descent and precedence climbing into an [`ast::Program`]
//! - [`DeterminerKind`] - The determiner agreement table
//! - [`visitor`] - Read-only traversal of the syntax tree

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod determiner;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token;
pub mod visitor;


pub use ast::{NodeId, NounPhrase, Program};
pub use determiner::DeterminerKind;
pub use lexer::Tokenizer;
pub use parser::{NodeKind, Parser};
pub use source::{ImportQueue, SourceFile};
pub use token::{Keyword, Operator, OperatorClass, Token, TokenKind};

use germanscript_foundation::Result;

/// Parses every file of an import queue into one program.
///
/// # Errors
/// Returns the first lexical or syntax error.
pub fn parse_queue(imports: ImportQueue) -> Result<Program> {
    Parser::new(Tokenizer::new(imports)).parse_program()
}

/// Parses a single in-memory source.
///
/// # Errors
/// Returns the first lexical or syntax error.
pub fn parse_source(source: SourceFile) -> Result<Program> {
    Parser::new(Tokenizer::from_source(source)).parse_program()
}

/// Parses a string.
///
/// # Errors
/// Returns the first lexical or syntax error.
pub fn parse_text(text: &str) -> Result<Program> {
    Parser::new(Tokenizer::from_text(text)).parse_program()
}
