//! Integration tests for Layer 2: Declension
//!
//! Tests for the dictionary and for populating it from programs.

mod dictionary;
mod loading;
