//! Configuration for a compilation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use germanscript_declension::DEFAULT_LOOKUP_TIMEOUT;

/// Location of the standard library shipped with the workspace.
pub const STANDARD_LIBRARY: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../stdlib/Standardbibliothek.gm");

/// Configuration for a compilation.
///
/// Controls which files are read, how external declensions are looked up
/// and how errors are shown.
#[derive(Clone, Debug)]
pub struct CompilerConfig {
    /// File read before the entry file, if any.
    pub standard_library: Option<PathBuf>,

    /// The user's program.
    pub entry: PathBuf,

    /// Bound on each external declension lookup.
    pub lookup_timeout: Duration,

    /// Write resolved external declensions back into their source lines.
    pub rewrite_sources: bool,

    /// Colour error output.
    pub colour: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            standard_library: Some(PathBuf::from(STANDARD_LIBRARY)),
            entry: PathBuf::new(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            rewrite_sources: true,
            colour: true,
        }
    }
}

impl CompilerConfig {
    /// Creates a configuration compiling `entry` after the standard library.
    #[must_use]
    pub fn for_entry(entry: impl Into<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            ..Self::default()
        }
    }

    /// Creates a configuration for tests: no standard library, no rewriting, no colour.
    #[must_use]
    pub fn isolated(entry: impl Into<PathBuf>) -> Self {
        Self {
            standard_library: None,
            entry: entry.into(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            rewrite_sources: false,
            colour: false,
        }
    }

    /// Builder method to set the standard library.
    #[must_use]
    pub fn with_standard_library(mut self, path: Option<PathBuf>) -> Self {
        self.standard_library = path;
        self
    }

    /// Builder method to set the entry file.
    #[must_use]
    pub fn with_entry(mut self, entry: impl Into<PathBuf>) -> Self {
        self.entry = entry.into();
        self
    }

    /// Builder method to set the lookup timeout.
    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Builder method to enable or disable source rewriting.
    #[must_use]
    pub fn with_source_rewrite(mut self, enabled: bool) -> Self {
        self.rewrite_sources = enabled;
        self
    }

    /// Builder method to enable or disable colour.
    #[must_use]
    pub fn with_colour(mut self, colour: bool) -> Self {
        self.colour = colour;
        self
    }

    /// The files seeding the import queue, in order.
    #[must_use]
    pub fn sources(&self) -> Vec<&Path> {
        self.standard_library
            .iter()
            .map(PathBuf::as_path)
            .chain(std::iter::once(self.entry.as_path()))
            .collect()
    }
}
