//! Concurrent lookups against the external declension service.
//!
//! Every `Deklination Duden(Wort)` found while scanning the program spawns
//! one task. The tasks run concurrently and are drained in discovery order
//! at a single barrier: the first failed lookup is raised there, tied to
//! its originating token, and the remaining results are discarded.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use germanscript_foundation::{Error, ErrorKind, LookupFailure, Result};
use germanscript_language::Token;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::entry::Declension;

/// The external declension service.
pub trait DeclensionService: Send + Sync + 'static {
    /// Resolves the declension of a noun.
    fn resolve(
        &self,
        word: &str,
    ) -> impl Future<Output = std::result::Result<Declension, LookupFailure>> + Send;
}

/// A service without network access: every lookup fails with `NoConnectivity`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineService;

impl DeclensionService for OfflineService {
    async fn resolve(&self, _word: &str) -> std::result::Result<Declension, LookupFailure> {
        Err(LookupFailure::NoConnectivity)
    }
}

/// A service answering from a fixed table, with an optional artificial delay.
#[derive(Clone, Debug, Default)]
pub struct MemoryService {
    answers: HashMap<String, std::result::Result<Declension, LookupFailure>>,
    delay: Option<Duration>,
}

impl MemoryService {
    /// Creates a service that knows no words.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `word` with `declension`.
    #[must_use]
    pub fn with(mut self, word: impl Into<String>, declension: Declension) -> Self {
        self.answers.insert(word.into(), Ok(declension));
        self
    }

    /// Answers `word` with `failure`.
    #[must_use]
    pub fn failing(mut self, word: impl Into<String>, failure: LookupFailure) -> Self {
        self.answers.insert(word.into(), Err(failure));
        self
    }

    /// Delays every answer.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl DeclensionService for MemoryService {
    async fn resolve(&self, word: &str) -> std::result::Result<Declension, LookupFailure> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answers
            .get(word)
            .cloned()
            .unwrap_or_else(|| Err(LookupFailure::NotFound(word.to_string())))
    }
}

// =============================================================================
// Lookup tasks
// =============================================================================

/// A `Deklination Duden(Wort)` statement awaiting its declension.
#[derive(Clone, Debug)]
pub struct LookupRequest {
    /// The `Deklination` keyword; its line is rewritten on success.
    pub statement: Token,
    /// The word to look up.
    pub word: Token,
}

/// A successfully resolved request.
#[derive(Clone, Debug)]
pub struct ResolvedDeclension {
    /// The originating request.
    pub request: LookupRequest,
    /// The declension the service returned.
    pub declension: Declension,
}

type LookupTask = JoinHandle<std::result::Result<Declension, LookupFailure>>;

/// Spawned lookups, joined in discovery order.
pub struct LookupBarrier {
    pending: VecDeque<(LookupRequest, LookupTask)>,
}

impl LookupBarrier {
    /// Spawns one task per request on the current tokio runtime.
    ///
    /// Each request is bounded by `timeout`; exceeding it fails with
    /// [`LookupFailure::Timeout`].
    #[must_use = "lookup failures are only raised when the barrier is drained"]
    pub fn spawn<S: DeclensionService>(
        service: &Arc<S>,
        requests: impl IntoIterator<Item = LookupRequest>,
        timeout: Duration,
    ) -> Self {
        let pending = requests
            .into_iter()
            .map(|request| {
                let service = Arc::clone(service);
                let word = request.word.text.clone();
                debug!(word = %word, "spawning declension lookup");
                let task = tokio::spawn(async move {
                    let answer = tokio::time::timeout(timeout, service.resolve(&word)).await;
                    answer.unwrap_or_else(|_| Err(LookupFailure::Timeout(word)))
                });
                (request, task)
            })
            .collect();
        Self { pending }
    }

    /// Number of lookups not yet drained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True if every lookup has been drained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Awaits every lookup in discovery order, handing each success to `on_resolved`.
    ///
    /// Draining stops at the first failure. Tasks not yet drained are
    /// detached, neither retried nor aborted.
    ///
    /// # Errors
    /// Returns the first lookup failure mapped onto its originating token,
    /// or the first error returned by `on_resolved`.
    pub async fn drain<F>(mut self, mut on_resolved: F) -> Result<()>
    where
        F: FnMut(ResolvedDeclension) -> Result<()>,
    {
        while let Some((request, task)) = self.pending.pop_front() {
            let outcome = task
                .await
                .map_err(|err| Error::internal(format!("declension lookup task failed: {err}")))?;
            match outcome {
                Ok(declension) => on_resolved(ResolvedDeclension {
                    request,
                    declension,
                })?,
                Err(failure) => {
                    warn!(word = %request.word.text, %failure, "declension lookup failed");
                    return Err(lookup_error(&request.word, failure));
                }
            }
        }
        Ok(())
    }
}

/// Maps a service failure onto the diagnostic raised at the barrier.
///
/// Unknown and unparsable words become "not found", missing connectivity
/// names the word, and every other failure propagates unchanged.
#[must_use]
pub fn lookup_error(word: &Token, failure: LookupFailure) -> Error {
    let kind = match failure {
        LookupFailure::NotFound(_) | LookupFailure::ParseFailure(_) => {
            ErrorKind::ExternalWordNotFound(word.text.clone())
        }
        LookupFailure::NoConnectivity => ErrorKind::NoConnectivity(word.text.clone()),
        other @ (LookupFailure::Timeout(_) | LookupFailure::ServerError(_)) => {
            ErrorKind::External(other)
        }
    };
    word.error(kind)
}
