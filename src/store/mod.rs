//! Read-only access to the host application's notes database.

mod connection;
mod listing;
mod schema;


use std::path::PathBuf;
use thiserror::Error;

pub use schema::{EntityCodes, QueryKind, SupportedColumns, build_query};

// ===========================================
// StoreError Type
// ===========================================

/// Errors from the structured store reader.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file does not exist.
    #[error("notes database not found: {}", path.display())]
    Unavailable { path: PathBuf },

    /// The database exists but could not be opened or queried.
    #[error("notes database query failed")]
    Query(#[from] rusqlite::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ===========================================
// NoteMeta
// ===========================================

/// A note row as read from the store, after title resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMeta {
    /// Row id (`Z_PK`).
    pub pk: i64,
    /// Containing folder name, empty when unfiled.
    pub folder: String,
    /// Display title, never empty.
    pub title: String,
    /// Title as stored, possibly empty.
    pub lookup_title: String,
    /// Store-assigned identifier, when the schema has one.
    pub identifier: Option<String>,
}

// ===========================================
// NoteStore Struct
// ===========================================

/// Reader over a notes database file.
///
/// Every listing opens its own read-only connection and closes it when done.
#[derive(Debug, Clone)]
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    /// Creates a reader for the database at `path`. Nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the database path this reader targets.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
