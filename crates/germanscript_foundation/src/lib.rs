//! Diagnostics, source spans and grammatical categories for GermanScript.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with source context, grouped by [`ErrorCategory`]
//! - [`Span`] - Line/column positions of tokens
//! - [`Case`], [`Number`], [`Gender`] - Grammatical categories and their sets

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod grammar;
pub mod span;

pub use error::{Error, ErrorCategory, ErrorContext, ErrorKind, LookupFailure, Result};
pub use grammar::{Case, CaseSet, Gender, Number, NumberSet};
pub use span::{Position, Span};
