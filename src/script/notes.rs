//! Notes, folders and note bodies via the automation host.

use std::collections::HashSet;

use super::{
    FIELD_SEP, ScriptNotes, ScriptResult, ScriptRunner, escape_script_string, output_lines,
    split_fields,
};
use crate::domain::{
    FolderEdge, RECENTLY_DELETED, display_line, folder_matches, is_recently_deleted,
    resolve_title,
};

/// A note as listed by the automation host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptNote {
    pub id: String,
    pub folder: String,
    pub title: String,
}

/// Walks every non-trash folder matching the filter and emits one line per
/// note using `record` (an expression over `folderName` and `eachNote`).
/// Lines are collected in a list and joined once at the end.
fn notes_script(folder: &str, record: &str) -> String {
    format!(
        r#"
set deletedTranslations to {deleted}
set folderFilter to "{filter}"
set prevTIDs to AppleScript's text item delimiters
set AppleScript's text item delimiters to linefeed
set outLines to {{}}

tell application "Notes"
    repeat with eachFolder in folders
        set folderName to name of eachFolder
        if folderName is not in deletedTranslations then
            considering case
                set wanted to (folderFilter is "" or folderName contains folderFilter)
            end considering
            if wanted then
                repeat with eachNote in notes of eachFolder
                    set end of outLines to ({record})
                end repeat
            end if
        end if
    end repeat
end tell

set output to outLines as text
set AppleScript's text item delimiters to prevTIDs
return output
"#,
        deleted = deleted_list(),
        filter = escape_script_string(folder.trim()),
        record = record,
    )
}

/// The trash folder names as a script list literal.
fn deleted_list() -> String {
    let items: Vec<String> = RECENTLY_DELETED
        .iter()
        .map(|name| format!("\"{}\"", escape_script_string(name)))
        .collect();
    format!("{{{}}}", items.join(", "))
}

const FOLDER_NAMES_SCRIPT: &str = r#"
set prevTIDs to AppleScript's text item delimiters
set AppleScript's text item delimiters to linefeed
set outLines to {}

tell application "Notes"
    repeat with f in every folder
        set end of outLines to (name of f as string)
    end repeat
end tell

set output to outLines as text
set AppleScript's text item delimiters to prevTIDs
return output
"#;

fn folder_edges_script() -> String {
    format!(
        r#"
set prevTIDs to AppleScript's text item delimiters
set AppleScript's text item delimiters to linefeed
set outLines to {{}}

tell application "Notes"
    repeat with f in every folder
        set fName to name of f as string
        try
            set c to container of f
            if (class of c as text) is "folder" then
                set parentName to name of c as string
            else
                set parentName to ""
            end if
        on error
            set parentName to ""
        end try
        set end of outLines to (fName & "{sep}" & parentName)
    end repeat
end tell

set output to outLines as text
set AppleScript's text item delimiters to prevTIDs
return output
"#,
        sep = FIELD_SEP
    )
}

impl<R: ScriptRunner> ScriptNotes<R> {
    /// Lists `"<folder> - <title>"` lines sorted case-insensitively.
    pub fn list_titles(&self, folder: &str) -> ScriptResult<Vec<String>> {
        let record = format!("folderName & \"{}\" & (name of eachNote)", FIELD_SEP);
        let stdout = self.runner.run(&notes_script(folder, &record))?;
        let filter = folder.trim();

        let mut titles = Vec::new();
        for line in output_lines(&stdout) {
            let fields = split_fields(line, 2)?;
            let (folder_name, title) = (fields[0].trim(), fields[1].trim());
            if is_recently_deleted(folder_name) || !folder_matches(folder_name, filter) {
                continue;
            }
            titles.push(display_line(
                folder_name,
                &resolve_title(Some(title), None, None, None),
            ));
        }

        titles.sort_by_cached_key(|t| t.to_lowercase());
        Ok(titles)
    }

    /// Lists notes with their host ids, in host order.
    ///
    /// Notes reachable from more than one folder share an id; only the first
    /// occurrence is kept.
    pub fn list_notes(&self, folder: &str) -> ScriptResult<Vec<ScriptNote>> {
        let record = format!(
            "(id of eachNote) & \"{sep}\" & folderName & \"{sep}\" & (name of eachNote)",
            sep = FIELD_SEP
        );
        let stdout = self.runner.run(&notes_script(folder, &record))?;
        let filter = folder.trim();

        let mut seen = HashSet::new();
        let mut notes = Vec::new();
        for line in output_lines(&stdout) {
            let fields = split_fields(line, 3)?;
            let note = ScriptNote {
                id: fields[0].trim().to_string(),
                folder: fields[1].trim().to_string(),
                title: fields[2].trim().to_string(),
            };
            if is_recently_deleted(&note.folder) || !folder_matches(&note.folder, filter) {
                continue;
            }
            if seen.insert(note.id.clone()) {
                notes.push(note);
            }
        }
        Ok(notes)
    }

    /// Lists distinct folder names sorted case-insensitively.
    pub fn list_folder_names(&self) -> ScriptResult<Vec<String>> {
        let stdout = self.runner.run(FOLDER_NAMES_SCRIPT)?;
        let mut names: Vec<String> = output_lines(&stdout)
            .map(|line| line.trim().to_string())
            .filter(|name| !is_recently_deleted(name))
            .collect();
        names.sort_by_cached_key(|n| (n.to_lowercase(), n.clone()));
        names.dedup();
        Ok(names)
    }

    /// Lists `(folder, parent)` pairs in host order.
    pub fn folder_edges(&self) -> ScriptResult<Vec<FolderEdge>> {
        let stdout = self.runner.run(&folder_edges_script())?;
        let mut edges = Vec::new();
        for line in output_lines(&stdout) {
            let fields = split_fields(line, 2)?;
            let name = fields[0].trim();
            if is_recently_deleted(name) {
                continue;
            }
            edges.push(FolderEdge::new(name, fields[1].trim()));
        }
        Ok(edges)
    }

    /// Returns the HTML body of the note with the given host id.
    pub fn note_body_by_id(&self, id: &str) -> ScriptResult<String> {
        let script = format!(
            r#"
tell application "Notes"
    set selectedNote to first note whose id is "{id}"
    return body of selectedNote
end tell
"#,
            id = escape_script_string(id.trim())
        );
        self.runner.run(&script)
    }

    /// Returns the HTML body of the first note with `title`, searching only
    /// `folder` when it is non-empty.
    pub fn note_body_by_folder_title(&self, folder: &str, title: &str) -> ScriptResult<String> {
        let title = escape_script_string(title);
        let script = if folder.is_empty() {
            format!(
                r#"
tell application "Notes"
    set selectedNote to first note whose name is "{title}"
    return body of selectedNote
end tell
"#
            )
        } else {
            format!(
                r#"
tell application "Notes"
    set theFolder to first folder whose name is "{folder}"
    set selectedNote to first note of theFolder whose name is "{title}"
    return body of selectedNote
end tell
"#,
                folder = escape_script_string(folder)
            )
        };
        self.runner.run(&script)
    }
}
