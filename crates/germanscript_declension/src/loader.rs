//! Populating the dictionary from a parsed program.
//!
//! Inline declensions are inserted as they are found. External ones are
//! looked up concurrently and inserted at the barrier, so the dictionary is
//! complete and read-only before grammar checking starts.

use std::sync::Arc;
use std::time::Duration;

use germanscript_foundation::Result;
use germanscript_language::ast::{DeclensionDef, DeclensionSource, Definition, Program};
use tracing::debug;

use crate::dictionary::DeclensionDictionary;
use crate::entry::Declension;
use crate::external::{DeclensionService, LookupBarrier, LookupRequest};
use crate::rewrite::rewrite_declaration;

/// Default bound on a single external lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds a [`DeclensionDictionary`] from the `Deklination` statements of a program.
#[derive(Debug)]
pub struct DictionaryLoader<S> {
    service: Arc<S>,
    timeout: Duration,
    rewrite_sources: bool,
}

impl<S: DeclensionService> DictionaryLoader<S> {
    /// Creates a loader that asks `service` for external declensions.
    #[must_use]
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
            rewrite_sources: true,
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Controls whether resolved lookups are written back into their source line.
    #[must_use]
    pub fn with_source_rewrite(mut self, enabled: bool) -> Self {
        self.rewrite_sources = enabled;
        self
    }

    /// Collects every declension of `program` into a dictionary.
    ///
    /// # Errors
    /// Returns the first duplicate declension, the first failed external
    /// lookup in discovery order, or a failed source rewrite.
    pub async fn load(&self, program: &Program) -> Result<DeclensionDictionary> {
        let mut dictionary = DeclensionDictionary::new();
        let mut requests = Vec::new();

        for declension in program.definitions.iter().filter_map(|definition| match definition {
            Definition::Declension(declension) => Some(declension),
            _ => None,
        }) {
            match &declension.source {
                DeclensionSource::Inline {
                    gender,
                    singular,
                    plural,
                } => {
                    let entry = Declension::new(*gender, singular.clone(), plural.clone());
                    insert(&mut dictionary, declension, entry)?;
                }
                DeclensionSource::External { word } => requests.push(LookupRequest {
                    statement: declension.token.clone(),
                    word: word.clone(),
                }),
            }
        }

        debug!(
            inline = dictionary.len(),
            external = requests.len(),
            "loading declensions"
        );

        let barrier = LookupBarrier::spawn(&self.service, requests, self.timeout);
        barrier
            .drain(|resolved| {
                let statement = &resolved.request.statement;
                if self.rewrite_sources {
                    rewrite_declaration(&statement.file, statement.span.line(), &resolved.declension)?;
                }
                dictionary
                    .insert(resolved.declension)
                    .map_err(|err| err.with_context(resolved.request.word.context()))
            })
            .await?;

        Ok(dictionary)
    }
}

fn insert(
    dictionary: &mut DeclensionDictionary,
    declension: &DeclensionDef,
    entry: Declension,
) -> Result<()> {
    dictionary
        .insert(entry)
        .map_err(|err| err.with_context(declension.token.context()))
}
