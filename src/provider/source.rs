//! Reader traits the provider is generic over, and their production impls.

use crate::domain::{FolderEdge, NoteRecord, Reminder};
use crate::script::{ScriptNote, ScriptNotes, ScriptResult, ScriptRunner};
use crate::store::{NoteMeta, NoteStore, StoreResult};

/// The fast read path over the host's database.
pub trait StructuredSource {
    fn list_titles(&self, folder: &str) -> StoreResult<Vec<String>>;
    fn list_folder_names(&self) -> StoreResult<Vec<String>>;
    fn list_notes_meta(&self, folder: &str) -> StoreResult<Vec<NoteMeta>>;
    fn folder_edges(&self) -> StoreResult<Vec<FolderEdge>>;
}

/// The slow read path through the host's scripting interface.
pub trait AutomationSource {
    fn list_titles(&self, folder: &str) -> ScriptResult<Vec<String>>;
    fn list_folder_names(&self) -> ScriptResult<Vec<String>>;
    fn list_notes(&self, folder: &str) -> ScriptResult<Vec<ScriptNote>>;
    fn folder_edges(&self) -> ScriptResult<Vec<FolderEdge>>;
    fn list_reminders(&self) -> ScriptResult<Vec<Reminder>>;
    fn note_body_by_id(&self, id: &str) -> ScriptResult<String>;
    fn note_body_by_folder_title(&self, folder: &str, title: &str) -> ScriptResult<String>;
}

impl StructuredSource for NoteStore {
    fn list_titles(&self, folder: &str) -> StoreResult<Vec<String>> {
        NoteStore::list_titles(self, folder)
    }

    fn list_folder_names(&self) -> StoreResult<Vec<String>> {
        NoteStore::list_folder_names(self)
    }

    fn list_notes_meta(&self, folder: &str) -> StoreResult<Vec<NoteMeta>> {
        NoteStore::list_notes_meta(self, folder)
    }

    fn folder_edges(&self) -> StoreResult<Vec<FolderEdge>> {
        NoteStore::folder_edges(self)
    }
}

impl<R: ScriptRunner> AutomationSource for ScriptNotes<R> {
    fn list_titles(&self, folder: &str) -> ScriptResult<Vec<String>> {
        ScriptNotes::list_titles(self, folder)
    }

    fn list_folder_names(&self) -> ScriptResult<Vec<String>> {
        ScriptNotes::list_folder_names(self)
    }

    fn list_notes(&self, folder: &str) -> ScriptResult<Vec<ScriptNote>> {
        ScriptNotes::list_notes(self, folder)
    }

    fn folder_edges(&self) -> ScriptResult<Vec<FolderEdge>> {
        ScriptNotes::folder_edges(self)
    }

    fn list_reminders(&self) -> ScriptResult<Vec<Reminder>> {
        ScriptNotes::list_reminders(self)
    }

    fn note_body_by_id(&self, id: &str) -> ScriptResult<String> {
        ScriptNotes::note_body_by_id(self, id)
    }

    fn note_body_by_folder_title(&self, folder: &str, title: &str) -> ScriptResult<String> {
        ScriptNotes::note_body_by_folder_title(self, folder, title)
    }
}

impl From<NoteMeta> for NoteRecord {
    fn from(meta: NoteMeta) -> Self {
        NoteRecord::from_store(
            meta.folder,
            meta.title,
            meta.identifier,
            meta.lookup_title,
            meta.pk,
        )
    }
}

impl From<ScriptNote> for NoteRecord {
    fn from(note: ScriptNote) -> Self {
        NoteRecord::from_script(note.id, note.folder, note.title)
    }
}
