//! Command handlers for the CLI.

mod folders;
mod notes;
mod preview;
mod rem;
mod search;


use std::io::Write;

use anyhow::Result;

use super::config::Settings;
use crate::provider::NotesProvider;
use crate::script::{Osascript, ScriptNotes};
use crate::store::NoteStore;

// Re-export public items
pub use folders::write_folder_tree;
pub use notes::{handle_notes, write_note_listing};
pub use preview::{PreviewItem, handle_preview, render_preview};
pub use rem::{handle_rem, write_reminders};
pub use search::{SearchMap, write_search_map};

// ===========================================
// Shared Utilities
// ===========================================

/// The provider wired to the real database and `osascript`.
pub type Provider = NotesProvider<NoteStore, ScriptNotes<Osascript>>;

/// Builds the production provider from resolved settings.
pub fn build_provider(settings: &Settings) -> Provider {
    NotesProvider::new(
        settings.backend,
        NoteStore::new(&settings.db_path),
        ScriptNotes::new(Osascript::new()),
        settings.cache(),
    )
}

/// Serializes `data` in the `{"data": ...}` envelope.
pub(crate) fn write_json<T: serde::Serialize, W: Write>(out: &mut W, data: T) -> Result<()> {
    let output = super::output::Output::new(data);
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
