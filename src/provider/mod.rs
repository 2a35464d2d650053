//! The single entry point for note listings.
//!
//! [`NotesProvider`] consults the result cache, applies the configured
//! [`Backend`] policy over its two injected readers, normalizes what they
//! return, and writes successful results back to the cache.

mod backend;
mod source;

#[cfg(test)]
mod tests;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::{FolderEdge, NoteRecord, Reminder};
use crate::infra::{ResultCache, Timer};
use crate::script::{ScriptError, ScriptResult};
use crate::store::{StoreError, StoreResult};

pub use backend::Backend;
pub use source::{AutomationSource, StructuredSource};

/// Version tag embedded in every cache key.
const CACHE_VERSION: &str = "v1";

// ===========================================
// ProviderError Type
// ===========================================

/// Errors surfaced by the provider after backend policy is applied.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The structured store failed and fallback was not allowed.
    #[error("structured notes backend failed")]
    Store(#[from] StoreError),

    /// The automation reader failed.
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

// ===========================================
// NotesProvider
// ===========================================

/// Backend-resolving, caching facade over a structured and an automation
/// reader.
pub struct NotesProvider<S, A> {
    backend: Backend,
    structured: S,
    automation: A,
    cache: ResultCache,
}

impl<S: StructuredSource, A: AutomationSource> NotesProvider<S, A> {
    pub fn new(backend: Backend, structured: S, automation: A, cache: ResultCache) -> Self {
        Self {
            backend,
            structured,
            automation,
            cache,
        }
    }

    /// Returns the active backend policy.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns the automation reader, for operations only it supports.
    pub fn automation(&self) -> &A {
        &self.automation
    }

    /// Lists display lines for notes in folders matching `folder`.
    pub fn list_titles(&self, folder: &str) -> ProviderResult<Vec<String>> {
        self.cached(
            &self.cache_key("note_titles", Some(folder)),
            "list_titles",
            |s| s.list_titles(folder),
            |a| a.list_titles(folder),
        )
    }

    /// Lists folder names, without trash folders.
    pub fn list_folder_names(&self) -> ProviderResult<Vec<String>> {
        self.cached(
            &self.cache_key("folder_names", None),
            "list_folder_names",
            |s| s.list_folder_names(),
            |a| a.list_folder_names(),
        )
    }

    /// Lists normalized note records for notes in folders matching `folder`.
    pub fn list_notes_meta(&self, folder: &str) -> ProviderResult<Vec<NoteRecord>> {
        self.cached(
            &self.cache_key("notes_meta", Some(folder)),
            "list_notes_meta",
            |s| {
                s.list_notes_meta(folder)
                    .map(|notes| notes.into_iter().map(NoteRecord::from).collect())
            },
            |a| {
                a.list_notes(folder)
                    .map(|notes| notes.into_iter().map(NoteRecord::from).collect())
            },
        )
    }

    /// Lists folder hierarchy edges. Not cached.
    pub fn folder_edges(&self) -> ProviderResult<Vec<FolderEdge>> {
        self.resolve("folder_edges", |s| s.folder_edges(), |a| a.folder_edges())
    }

    /// Lists incomplete reminders. Only the automation reader knows
    /// reminders, so the backend policy does not apply. Not cached.
    pub fn list_reminders(&self) -> ProviderResult<Vec<Reminder>> {
        let _timer = Timer::start("provider/list_reminders");
        Ok(self.automation.list_reminders()?)
    }

    fn cache_key(&self, kind: &str, folder: Option<&str>) -> String {
        match folder {
            Some(folder) => format!("{}:{}:{}:{}", kind, CACHE_VERSION, self.backend, folder),
            None => format!("{}:{}:{}", kind, CACHE_VERSION, self.backend),
        }
    }

    /// Serves `key` from the cache, or resolves it and stores the result.
    fn cached<T, FS, FA>(
        &self,
        key: &str,
        label: &str,
        structured: FS,
        automation: FA,
    ) -> ProviderResult<T>
    where
        T: Serialize + DeserializeOwned,
        FS: FnOnce(&S) -> StoreResult<T>,
        FA: FnOnce(&A) -> ScriptResult<T>,
    {
        if let Some(hit) = self.cache.get::<T>(key) {
            tracing::info!(target: crate::infra::TIMING_TARGET, "provider/{}: cache hit", label);
            return Ok(hit);
        }

        let out = self.resolve(label, structured, automation)?;
        self.cache.set(key, &out);
        Ok(out)
    }

    /// Applies the backend policy to one listing.
    fn resolve<T, FS, FA>(&self, label: &str, structured: FS, automation: FA) -> ProviderResult<T>
    where
        FS: FnOnce(&S) -> StoreResult<T>,
        FA: FnOnce(&A) -> ScriptResult<T>,
    {
        match self.backend {
            Backend::Structured => {
                let _timer = Timer::start(format!("provider/{}/sqlite_forced", label));
                Ok(structured(&self.structured)?)
            }
            Backend::Automation => {
                let _timer = Timer::start(format!("provider/{}/applescript_forced", label));
                Ok(automation(&self.automation)?)
            }
            Backend::Auto => {
                {
                    let _timer = Timer::start(format!("provider/{}/sqlite", label));
                    match structured(&self.structured) {
                        Ok(out) => return Ok(out),
                        Err(e) => {
                            tracing::debug!(error = %e, "{}: structured store failed, falling back", label)
                        }
                    }
                }
                let _timer = Timer::start(format!("provider/{}/applescript", label));
                Ok(automation(&self.automation)?)
            }
        }
    }
}
