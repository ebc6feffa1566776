//! Integration tests for Layer 1: Language
//!
//! Tests for the tokenizer, import queue and parser.

mod imports;
mod parser;
mod tokenizer;
