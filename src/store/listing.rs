//! Listing queries over the notes database.

use super::schema::{EntityCodes, QueryKind, SupportedColumns, build_query};
use super::{NoteMeta, NoteStore, StoreResult};
use crate::domain::{FolderEdge, display_line, folder_matches, is_recently_deleted, resolve_title};
use crate::infra::Timer;
use rusqlite::Connection;

/// Raw note row: pk, title, snippet, summary, identifier, folder.
type NoteRow = (
    i64,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

impl NoteStore {
    /// Lists `"<folder> - <title>"` lines (or bare titles for unfiled notes),
    /// sorted case-insensitively.
    pub fn list_titles(&self, folder: &str) -> StoreResult<Vec<String>> {
        let mut titles: Vec<String> = self
            .read_notes(folder)?
            .into_iter()
            .map(|n| display_line(&n.folder, &n.title))
            .collect();
        titles.sort_by_cached_key(|t| t.to_lowercase());
        Ok(titles)
    }

    /// Lists note metadata sorted by folder, then title, ignoring case.
    pub fn list_notes_meta(&self, folder: &str) -> StoreResult<Vec<NoteMeta>> {
        let mut notes = self.read_notes(folder)?;
        notes.sort_by_cached_key(|n| format!("{}\n{}", n.folder, n.title).to_lowercase());
        Ok(notes)
    }

    /// Lists distinct folder names, sorted case-insensitively.
    pub fn list_folder_names(&self) -> StoreResult<Vec<String>> {
        let conn = self.connect()?;
        let _timer = Timer::start("store/list_folder_names");
        let sql = Self::query_for(&conn, QueryKind::FolderNames)?;

        let mut names: Vec<String> = conn
            .prepare(&sql)?
            .query_map([], |row| row.get::<_, Option<String>>(0))?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty() && !is_recently_deleted(name))
            .collect();

        names.sort_by_cached_key(|n| (n.to_lowercase(), n.clone()));
        names.dedup();
        Ok(names)
    }

    /// Lists `(folder, parent)` pairs, sorted by folder name.
    pub fn folder_edges(&self) -> StoreResult<Vec<FolderEdge>> {
        let conn = self.connect()?;
        let _timer = Timer::start("store/folder_edges");
        let sql = Self::query_for(&conn, QueryKind::FolderEdges)?;

        let mut edges: Vec<FolderEdge> = conn
            .prepare(&sql)?
            .query_map([], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter_map(|(name, parent)| {
                let name = name?.trim().to_string();
                let parent = parent.unwrap_or_default().trim().to_string();
                (!name.is_empty() && !is_recently_deleted(&name))
                    .then(|| FolderEdge::new(name, parent))
            })
            .collect();

        edges.sort_by_cached_key(|e| e.name.to_lowercase());
        Ok(edges)
    }

    /// Reads, filters and titles every visible note in matching folders.
    fn read_notes(&self, folder: &str) -> StoreResult<Vec<NoteMeta>> {
        let conn = self.connect()?;
        let filter = folder.trim();

        let rows: Vec<NoteRow> = {
            let _timer = Timer::start("store/notes/query");
            let sql = Self::query_for(&conn, QueryKind::Notes)?;
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                })?
                .collect::<Result<Vec<NoteRow>, _>>()?;
            rows
        };

        let _timer = Timer::start("store/notes/format");
        let notes = rows
            .into_iter()
            .filter_map(|(pk, title, snippet, summary, identifier, folder_name)| {
                let folder_name = folder_name.unwrap_or_default().trim().to_string();
                if is_recently_deleted(&folder_name) || !folder_matches(&folder_name, filter) {
                    return None;
                }

                let display = resolve_title(
                    title.as_deref(),
                    snippet.as_deref(),
                    summary.as_deref(),
                    Some(pk),
                );
                Some(NoteMeta {
                    pk,
                    folder: folder_name,
                    title: display,
                    lookup_title: title.unwrap_or_default(),
                    identifier: identifier.filter(|id| !id.trim().is_empty()),
                })
            })
            .collect();
        Ok(notes)
    }

    fn query_for(conn: &Connection, kind: QueryKind) -> StoreResult<String> {
        let cols = SupportedColumns::probe(conn)?;
        let codes = EntityCodes::probe(conn)?;
        Ok(build_query(kind, &cols, &codes))
    }
}
