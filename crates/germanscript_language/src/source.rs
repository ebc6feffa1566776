//! Import queue for tracking which source files have been tokenized.
//!
//! The `ImportQueue` tracks:
//! - Which files are still waiting to be tokenized, in discovery order
//! - Which files were already dequeued, for cycle detection

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use germanscript_foundation::{Error, ErrorContext, ErrorKind, Result};
use tracing::debug;

/// A source file loaded into memory.
#[derive(Clone, Debug)]
pub struct SourceFile {
    /// Path of the file as it was queued.
    pub path: Arc<Path>,
    /// The file contents.
    pub text: String,
}

impl SourceFile {
    /// Creates a source file from text that does not live on disk.
    #[must_use]
    pub fn in_memory(path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        Self {
            path: Arc::from(path.as_ref()),
            text: text.into(),
        }
    }

    /// Reads a source file from disk.
    ///
    /// # Errors
    /// Returns `SourceUnreadable` if the file cannot be read.
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            Error::at(
                ErrorKind::SourceUnreadable {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                },
                ErrorContext::new().with_file(path),
            )
        })?;
        Ok(Self {
            path: Arc::from(path),
            text,
        })
    }
}

/// Queue of files to tokenize.
///
/// Provides:
/// - FIFO ordering, seeded with the standard library and the entry file
/// - Cycle detection: enqueueing a file that was already dequeued is an error
/// - Deduplication: enqueueing a file that is still waiting is ignored
#[derive(Debug, Default)]
pub struct ImportQueue {
    /// Files waiting to be tokenized.
    pending: VecDeque<PathBuf>,
    /// Files that were dequeued.
    visited: HashSet<PathBuf>,
}

impl ImportQueue {
    /// Creates a new empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue seeded with the given files, in order.
    ///
    /// # Errors
    /// Never fails for a fresh queue; shares `enqueue`'s error contract.
    pub fn seeded<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut queue = Self::new();
        for path in paths {
            queue.enqueue(path.as_ref(), None)?;
        }
        Ok(queue)
    }

    /// Normalizes a path so that different spellings of one file compare equal.
    fn normalize(path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }

    /// Adds a file to the back of the queue.
    ///
    /// `origin` is the location of the import statement, if any.
    ///
    /// # Errors
    /// Returns `CyclicImport` if the file was already tokenized.
    pub fn enqueue(&mut self, path: &Path, origin: Option<ErrorContext>) -> Result<()> {
        let path = Self::normalize(path);
        if self.visited.contains(&path) {
            let error = Error::new(ErrorKind::CyclicImport(path));
            return Err(match origin {
                Some(context) => error.with_context(context),
                None => error,
            });
        }
        if !self.pending.contains(&path) {
            debug!(path = %path.display(), "queued source file");
            self.pending.push_back(path);
        }
        Ok(())
    }

    /// Marks a file as visited without queueing it, used for in-memory sources.
    pub fn mark_visited(&mut self, path: &Path) {
        self.visited.insert(Self::normalize(path));
    }

    /// Takes the next file off the queue and marks it visited.
    pub fn dequeue(&mut self) -> Option<PathBuf> {
        let path = self.pending.pop_front()?;
        self.visited.insert(path.clone());
        Some(path)
    }

    /// Returns true if the file was already dequeued.
    #[must_use]
    pub fn is_visited(&self, path: &Path) -> bool {
        self.visited.contains(&Self::normalize(path))
    }

    /// Returns the number of files still waiting.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if no file is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
