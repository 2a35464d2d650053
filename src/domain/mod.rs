//! Core types: NoteRecord, FolderEdge and the folder tree, Reminder

mod deleted;
mod folder;
mod note_record;
mod reminder;

pub use deleted::{RECENTLY_DELETED, is_recently_deleted};
pub use folder::{FolderEdge, FolderTree, build_tree, folder_matches, render_tree};
pub use note_record::{NoteRecord, collapse_whitespace, display_line, resolve_title};
pub use reminder::{DueDate, Reminder, due_label};
