//! Fixture notes database builder.

#![allow(dead_code)]

use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
    CREATE TABLE Z_PRIMARYKEY (Z_ENT INTEGER PRIMARY KEY, Z_NAME VARCHAR, Z_SUPER INTEGER, Z_MAX INTEGER);
    INSERT INTO Z_PRIMARYKEY (Z_ENT, Z_NAME) VALUES (12, 'ICNote'), (15, 'ICFolder');
    CREATE TABLE ZICCLOUDSYNCINGOBJECT (
        Z_PK INTEGER PRIMARY KEY,
        Z_ENT INTEGER,
        ZTITLE1 VARCHAR,
        ZTITLE2 VARCHAR,
        ZSNIPPET VARCHAR,
        ZSUMMARY VARCHAR,
        ZIDENTIFIER VARCHAR,
        ZFOLDER INTEGER,
        ZPARENT INTEGER,
        ZMARKEDFORDELETION INTEGER,
        ZISPASSWORDPROTECTED INTEGER
    );
";

/// A notes database laid out like the host's, written row by row.
///
/// Folder and note rows share one primary key sequence, as in the host.
pub struct TestStore {
    path: PathBuf,
}

impl TestStore {
    /// Creates the database file with the full schema.
    pub fn create(path: &Path) -> Self {
        let conn = Connection::open(path).expect("Failed to create notes database");
        conn.execute_batch(SCHEMA).expect("Failed to create schema");
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn conn(&self) -> Connection {
        Connection::open(&self.path).expect("Failed to open notes database")
    }

    fn insert(&self, sql: &str, params: impl rusqlite::Params) -> i64 {
        let conn = self.conn();
        conn.execute(sql, params).expect("Failed to insert row");
        conn.last_insert_rowid()
    }

    /// Adds a folder and returns its key.
    pub fn folder(&self, name: &str, parent: Option<i64>) -> i64 {
        self.insert(
            "INSERT INTO ZICCLOUDSYNCINGOBJECT (Z_ENT, ZTITLE2, ZPARENT) VALUES (15, ?1, ?2)",
            params![name, parent],
        )
    }

    /// Adds a titled note and returns its key.
    pub fn note(&self, title: &str, folder: Option<i64>) -> i64 {
        let pk = self.insert(
            "INSERT INTO ZICCLOUDSYNCINGOBJECT (Z_ENT, ZTITLE1, ZFOLDER) VALUES (12, ?1, ?2)",
            params![title, folder],
        );
        self.conn()
            .execute(
                "UPDATE ZICCLOUDSYNCINGOBJECT SET ZIDENTIFIER = ?1 WHERE Z_PK = ?2",
                params![format!("NOTE-{}", pk), pk],
            )
            .expect("Failed to set identifier");
        pk
    }

    /// Adds a note with no title and only a snippet.
    pub fn untitled_note(&self, snippet: Option<&str>, folder: Option<i64>) -> i64 {
        self.insert(
            "INSERT INTO ZICCLOUDSYNCINGOBJECT (Z_ENT, ZSNIPPET, ZFOLDER) VALUES (12, ?1, ?2)",
            params![snippet, folder],
        )
    }

    /// Marks a row as deleted.
    pub fn mark_deleted(&self, pk: i64) {
        self.conn()
            .execute(
                "UPDATE ZICCLOUDSYNCINGOBJECT SET ZMARKEDFORDELETION = 1 WHERE Z_PK = ?1",
                params![pk],
            )
            .expect("Failed to mark row deleted");
    }

    /// Renames a note in place.
    pub fn rename_note(&self, pk: i64, title: &str) {
        self.conn()
            .execute(
                "UPDATE ZICCLOUDSYNCINGOBJECT SET ZTITLE1 = ?1 WHERE Z_PK = ?2",
                params![title, pk],
            )
            .expect("Failed to rename note");
    }
}
