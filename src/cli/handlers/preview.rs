//! Preview pane rendering for the search UI.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::search::SearchMap;
use crate::cli::PreviewArgs;
use crate::domain::NoteRecord;
use crate::infra::html_to_text;
use crate::provider::AutomationSource;
use crate::script::{Osascript, ScriptError, ScriptNotes, ScriptResult};

const NO_PREVIEW: &str = "(no preview)";
const PREVIEW_ERROR: &str = "(preview error)";

/// Directory next to the map holding rendered previews.
const PREVIEW_CACHE_DIR: &str = "preview_cache_v1";

/// One searchable note plus the key its rendered preview is cached under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewItem {
    #[serde(flatten)]
    pub note: NoteRecord,
    pub cache_key: String,
}

impl PreviewItem {
    /// Keys the preview by script id, then identifier, then primary key,
    /// then the listing key.
    pub fn new(note: NoteRecord, listing_key: &str) -> Self {
        let cache_key = note
            .script_id()
            .map(str::to_string)
            .or_else(|| note.identifier().map(str::to_string))
            .or_else(|| note.primary_key().map(|pk| pk.to_string()))
            .unwrap_or_else(|| listing_key.to_string());
        Self { note, cache_key }
    }
}

pub fn handle_preview(args: &PreviewArgs) -> Result<()> {
    let notes = ScriptNotes::new(Osascript::new());
    println!("{}", render_preview(&notes, &args.map, &args.key));
    Ok(())
}

/// Renders the preview for `key`. Never fails: problems are reported in the
/// returned text so the search UI keeps running.
pub fn render_preview<A: AutomationSource>(automation: &A, map: &Path, key: &str) -> String {
    match try_render(automation, map, key) {
        Ok(text) => text,
        Err(e) => format!("(preview error: {:#})", e),
    }
}

fn try_render<A: AutomationSource>(automation: &A, map: &Path, key: &str) -> Result<String> {
    let Some(item) = SearchMap::load_item(map, key)? else {
        return Ok(NO_PREVIEW.to_string());
    };

    let cache = preview_cache_path(map, &item.cache_key);
    if let Ok(cached) = std::fs::read_to_string(&cache) {
        if !cached.is_empty() {
            return Ok(cached);
        }
    }

    match fetch_body(automation, &item.note) {
        Ok(html) => {
            let text = html_to_text(&html);
            store_preview(&cache, &text);
            Ok(text)
        }
        Err(e) => Ok(error_text(&e)),
    }
}

/// Fetches a note body by script id, else by identifier with a folder and
/// title retry, else by folder and title.
fn fetch_body<A: AutomationSource>(automation: &A, note: &NoteRecord) -> ScriptResult<String> {
    let by_title = || automation.note_body_by_folder_title(note.folder(), note.lookup_title());

    if let Some(id) = note.script_id().filter(|id| !id.trim().is_empty()) {
        return automation.note_body_by_id(id);
    }
    if let Some(identifier) = note.identifier() {
        return automation.note_body_by_id(identifier).or_else(|e| {
            tracing::debug!(error = %e, "preview by identifier failed, retrying by title");
            by_title()
        });
    }
    by_title()
}

fn error_text(err: &ScriptError) -> String {
    let detail = match err {
        ScriptError::Failed { stderr } => stderr.trim().to_string(),
        other => other.to_string(),
    };
    if detail.is_empty() {
        PREVIEW_ERROR.to_string()
    } else {
        format!("{}\n\n{}", PREVIEW_ERROR, detail)
    }
}

/// Cached previews live next to the map, keyed by the sanitized cache key.
pub(crate) fn preview_cache_path(map: &Path, cache_key: &str) -> PathBuf {
    let safe: String = cache_key
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    let safe = if safe.is_empty() { "0".to_string() } else { safe };

    map.parent()
        .unwrap_or_else(|| Path::new("."))
        .join(PREVIEW_CACHE_DIR)
        .join(format!("{}.md", safe))
}

fn store_preview(path: &Path, text: &str) {
    let result = path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|()| std::fs::write(path, text));
    if let Err(e) = result {
        tracing::debug!(error = %e, path = %path.display(), "failed to cache preview");
    }
}
