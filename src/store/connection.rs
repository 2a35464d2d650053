//! Connection management for NoteStore.

use super::{NoteStore, StoreError, StoreResult};
use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;
use std::time::Duration;

/// How long to wait on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_millis(100);

impl NoteStore {
    /// Returns the host application's database location for the current user.
    ///
    /// This is a private detail of the host and may move between versions.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Library")
            .join("Group Containers")
            .join("group.com.apple.notes")
            .join("NoteStore.sqlite")
    }

    /// Opens the database read-only.
    ///
    /// A missing file is reported as `Unavailable` rather than letting
    /// SQLite fail, so callers can tell "no store" from "broken store".
    pub(crate) fn connect(&self) -> StoreResult<Connection> {
        if !self.path.exists() {
            return Err(StoreError::Unavailable {
                path: self.path.clone(),
            });
        }

        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }
}
