//! Compilation pipeline for GermanScript.
//!
//! This crate provides:
//! - [`CompilerConfig`] - Standard library, entry file, lookup and output settings
//! - [`compile`] - Runs every stage of the front end over the configured files
//! - [`CompiledProgram`] - Resolution of calls, methods, types and conversions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod pipeline;

pub use config::{CompilerConfig, STANDARD_LIBRARY};
pub use pipeline::{CompiledProgram, analyze, compile};
