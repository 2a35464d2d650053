//! The backend-neutral note listing record.

use serde::{Deserialize, Serialize};

/// Placeholder title for notes with no usable title text.
const UNTITLED: &str = "(Untitled)";

/// One listed note, normalized from either backend.
///
/// A record carries the store identifier only when it came from the
/// structured store, and the script id only when it came from the automation
/// host. The two constructors are the only way to build one, so a record
/// never holds both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    folder: String,
    title: String,
    identifier: Option<String>,
    script_id: Option<String>,
    lookup_title: String,
    primary_key: Option<i64>,
}

impl NoteRecord {
    /// Creates a record read from the structured store.
    pub fn from_store(
        folder: impl Into<String>,
        title: impl Into<String>,
        identifier: Option<String>,
        lookup_title: impl Into<String>,
        primary_key: i64,
    ) -> Self {
        Self {
            folder: folder.into(),
            title: title.into(),
            identifier: identifier.filter(|id| !id.trim().is_empty()),
            script_id: None,
            lookup_title: lookup_title.into(),
            primary_key: Some(primary_key),
        }
    }

    /// Creates a record read through the automation host.
    ///
    /// The automation host only reports names. The raw name is kept as the
    /// lookup title; a blank name is displayed as a placeholder.
    pub fn from_script(
        script_id: impl Into<String>,
        folder: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let lookup_title = name.into();
        Self {
            folder: folder.into(),
            title: resolve_title(Some(&lookup_title), None, None, None),
            lookup_title,
            identifier: None,
            script_id: Some(script_id.into()),
            primary_key: None,
        }
    }

    /// Returns the containing folder name, empty when unfiled.
    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Returns the display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the structured store identifier, if any.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Returns the automation host id, if any.
    pub fn script_id(&self) -> Option<&str> {
        self.script_id.as_deref()
    }

    /// Returns the title as stored, which may be empty.
    pub fn lookup_title(&self) -> &str {
        &self.lookup_title
    }

    /// Returns the structured store row id, if any.
    pub fn primary_key(&self) -> Option<i64> {
        self.primary_key
    }

    /// Returns the `"<folder> - <title>"` line shown in listings.
    pub fn display(&self) -> String {
        display_line(&self.folder, &self.title)
    }
}

/// Formats a listing line, omitting the folder prefix for unfiled notes.
pub fn display_line(folder: &str, title: &str) -> String {
    if folder.is_empty() {
        title.to_string()
    } else {
        format!("{} - {}", folder, title)
    }
}

/// Joins all whitespace-separated words with single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Picks the display title for a stored note.
///
/// Precedence: the stored title, then the snippet, then the summary (both
/// flattened to one line), then a placeholder that includes the row id when
/// it is known.
pub fn resolve_title(
    title: Option<&str>,
    snippet: Option<&str>,
    summary: Option<&str>,
    primary_key: Option<i64>,
) -> String {
    if let Some(t) = title.map(str::trim).filter(|t| !t.is_empty()) {
        return t.to_string();
    }

    for derived in [snippet, summary].into_iter().flatten() {
        let line = collapse_whitespace(derived);
        if !line.is_empty() {
            return line;
        }
    }

    match primary_key {
        Some(pk) => format!("(Untitled #{})", pk),
        None => UNTITLED.to_string(),
    }
}
