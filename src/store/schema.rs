//! Schema probing and SQL generation for the host's notes database.
//!
//! The schema belongs to the host application and shifts between releases.
//! Everything version-dependent is detected here once per connection and fed
//! to [`build_query`]; the listing code never checks columns itself.

use super::StoreResult;
use rusqlite::Connection;

/// The single table holding notes, folders and most other synced objects.
pub(crate) const OBJECT_TABLE: &str = "ZICCLOUDSYNCINGOBJECT";

/// Column names tried, in order, for a folder's parent reference.
const PARENT_COLUMNS: &[&str] = &["ZPARENT", "ZPARENTFOLDER"];

// ===========================================
// SupportedColumns
// ===========================================

/// Optional columns present in the object table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportedColumns {
    pub snippet: bool,
    pub summary: bool,
    pub identifier: bool,
    pub marked_for_deletion: bool,
    pub password_protected: bool,
    /// The parent-reference column, if any variant exists.
    pub parent: Option<&'static str>,
}

impl SupportedColumns {
    /// Reads the object table's columns from the database.
    pub fn probe(conn: &Connection) -> StoreResult<Self> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", OBJECT_TABLE))?;
        let names: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<_, _>>()?;
        Ok(Self::from_names(&names))
    }

    /// Builds the set from a list of column names.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let has = |wanted: &str| {
            names
                .iter()
                .any(|n| AsRef::<str>::as_ref(n).eq_ignore_ascii_case(wanted))
        };

        Self {
            snippet: has("ZSNIPPET"),
            summary: has("ZSUMMARY"),
            identifier: has("ZIDENTIFIER"),
            marked_for_deletion: has("ZMARKEDFORDELETION"),
            password_protected: has("ZISPASSWORDPROTECTED"),
            parent: PARENT_COLUMNS.iter().copied().find(|c| has(c)),
        }
    }
}

// ===========================================
// EntityCodes
// ===========================================

/// `Z_ENT` values distinguishing notes from folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityCodes {
    pub note: i64,
    pub folder: i64,
}

impl Default for EntityCodes {
    fn default() -> Self {
        Self {
            note: 12,
            folder: 15,
        }
    }
}

impl EntityCodes {
    /// Looks the codes up in `Z_PRIMARYKEY`, keeping the defaults for any
    /// entity (or the whole table) that is missing.
    pub fn probe(conn: &Connection) -> StoreResult<Self> {
        let mut codes = Self::default();

        let has_table: bool = conn
            .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'Z_PRIMARYKEY'")?
            .exists([])?;
        if !has_table {
            return Ok(codes);
        }

        let mut stmt = conn.prepare(
            "SELECT Z_ENT, Z_NAME FROM Z_PRIMARYKEY WHERE Z_NAME IN ('ICNote', 'ICFolder')",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            match row? {
                (ent, name) if name == "ICNote" => codes.note = ent,
                (ent, name) if name == "ICFolder" => codes.folder = ent,
                _ => {}
            }
        }
        Ok(codes)
    }
}

// ===========================================
// Query Builder
// ===========================================

/// The listings the store can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Columns: pk, title, snippet, summary, identifier, folder.
    Notes,
    /// Columns: folder.
    FolderNames,
    /// Columns: name, parent.
    FolderEdges,
}

/// Generates the SQL for a listing against the probed schema.
///
/// Missing optional columns are projected as `NULL` and their filters are
/// dropped, so an older or newer schema degrades instead of failing.
pub fn build_query(kind: QueryKind, cols: &SupportedColumns, codes: &EntityCodes) -> String {
    let optional = |present: bool, column: &str| {
        if present {
            format!("n.{}", column)
        } else {
            "NULL".to_string()
        }
    };

    let live = |alias: &str| {
        let mut clauses = String::new();
        if cols.marked_for_deletion {
            clauses.push_str(&format!(
                " AND ({a}.ZMARKEDFORDELETION IS NULL OR {a}.ZMARKEDFORDELETION = 0)",
                a = alias
            ));
        }
        clauses
    };

    match kind {
        QueryKind::Notes => {
            let mut sql = format!(
                "SELECT n.Z_PK, n.ZTITLE1, {snippet}, {summary}, {identifier}, f.ZTITLE2 \
                 FROM {table} n \
                 LEFT JOIN {table} f ON f.Z_PK = n.ZFOLDER AND f.Z_ENT = {folder} \
                 WHERE n.Z_ENT = {note}{live}",
                snippet = optional(cols.snippet, "ZSNIPPET"),
                summary = optional(cols.summary, "ZSUMMARY"),
                identifier = optional(cols.identifier, "ZIDENTIFIER"),
                table = OBJECT_TABLE,
                folder = codes.folder,
                note = codes.note,
                live = live("n"),
            );
            if cols.password_protected {
                sql.push_str(
                    " AND (n.ZISPASSWORDPROTECTED IS NULL OR n.ZISPASSWORDPROTECTED = 0)",
                );
            }
            sql
        }
        QueryKind::FolderNames => format!(
            "SELECT DISTINCT n.ZTITLE2 FROM {table} n \
             WHERE n.Z_ENT = {folder} AND n.ZTITLE2 IS NOT NULL AND n.ZTITLE2 != ''{live}",
            table = OBJECT_TABLE,
            folder = codes.folder,
            live = live("n"),
        ),
        QueryKind::FolderEdges => match cols.parent {
            Some(parent) => format!(
                "SELECT n.ZTITLE2, p.ZTITLE2 FROM {table} n \
                 LEFT JOIN {table} p ON p.Z_PK = n.{parent} AND p.Z_ENT = {folder} \
                 WHERE n.Z_ENT = {folder} AND n.ZTITLE2 IS NOT NULL AND n.ZTITLE2 != ''{live}",
                table = OBJECT_TABLE,
                parent = parent,
                folder = codes.folder,
                live = live("n"),
            ),
            None => format!(
                "SELECT n.ZTITLE2, NULL FROM {table} n \
                 WHERE n.Z_ENT = {folder} AND n.ZTITLE2 IS NOT NULL AND n.ZTITLE2 != ''{live}",
                table = OBJECT_TABLE,
                folder = codes.folder,
                live = live("n"),
            ),
        },
    }
}
