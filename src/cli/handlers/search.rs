//! Fuzzy search over notes through `fzf`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

use super::preview::PreviewItem;
use crate::domain::NoteRecord;
use crate::infra::Timer;
use crate::provider::{AutomationSource, NotesProvider, StructuredSource};

/// File name of the preview map inside the search working directory.
pub const MAP_FILE: &str = "notes_map_v1.json";

/// Selects from newline separated `"<key>\t<display>"` lines.
pub(crate) trait Picker {
    fn pick(&self, input: &str, map: &Path, workdir: &Path) -> Result<()>;
}

/// Runs `fzf` with a preview pane backed by `memo preview`.
struct Fzf<'a> {
    shell: &'a str,
    exe: PathBuf,
}

impl Picker for Fzf<'_> {
    fn pick(&self, input: &str, map: &Path, workdir: &Path) -> Result<()> {
        let preview = format!(
            "{} preview --map {} --key {{1}} | if command -v bat >/dev/null 2>&1; \
             then bat --style=plain --color=always --language=markdown -; else cat; fi",
            shell_quote(&self.exe.to_string_lossy()),
            shell_quote(&map.to_string_lossy()),
        );

        // fzf runs --preview through $SHELL, which may not be POSIX
        let mut child = Command::new("fzf")
            .args([
                "--border",
                "--padding=1,2",
                "--border-label= Your Notes ",
                "--delimiter=\t",
                "--with-nth=2..",
                "--preview-window=right:60%:wrap:cycle",
                "--bind=ctrl-d:preview-down,ctrl-u:preview-up",
            ])
            .arg(format!("--preview={}", preview))
            .env("SHELL", self.shell)
            .current_dir(workdir)
            .stdin(Stdio::piped())
            .spawn()
            .context("failed to launch fzf (is it installed?)")?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(input.as_bytes()) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => return Err(e).context("failed to send notes to fzf"),
            }
        }

        // Cancelling the picker is not an error
        child.wait().context("failed to wait for fzf")?;
        Ok(())
    }
}

pub(crate) fn run_search<S, A>(provider: &NotesProvider<S, A>, folder: &str, shell: &str) -> Result<()>
where
    S: StructuredSource,
    A: AutomationSource,
{
    let exe = std::env::current_exe().context("failed to locate the memo executable")?;
    search_with(provider, folder, &Fzf { shell, exe })
}

pub(crate) fn search_with<S, A, P>(provider: &NotesProvider<S, A>, folder: &str, picker: &P) -> Result<()>
where
    S: StructuredSource,
    A: AutomationSource,
    P: Picker,
{
    let notes = {
        let _timer = Timer::start("search/list_notes_meta");
        provider
            .list_notes_meta(folder)
            .context("failed to list notes")?
    };
    if notes.is_empty() {
        println!("\nNo notes found.");
        return Ok(());
    }

    let dir = TempDir::new().context("failed to create search directory")?;
    let map_path = dir.path().join(MAP_FILE);
    let input = write_search_map(notes, &map_path)?;
    picker.pick(&input, &map_path, dir.path())
}

// ===========================================
// Search Map
// ===========================================

/// The preview map shared between the picker and `memo preview`.
#[derive(Debug, Default, Serialize)]
pub struct SearchMap {
    pub items: HashMap<String, PreviewItem>,
}

/// On-disk map layouts `memo preview` accepts.
#[derive(Deserialize)]
#[serde(untagged)]
enum MapFile {
    Wrapped { items: HashMap<String, Value> },
    Bare(HashMap<String, Value>),
}

impl SearchMap {
    /// Loads the raw entry for `key`. `Ok(None)` when the key is absent or
    /// its entry is not an object.
    pub fn load_item(path: &Path, key: &str) -> Result<Option<PreviewItem>> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let map: MapFile = serde_json::from_str(&contents)
            .with_context(|| format!("invalid preview map {}", path.display()))?;

        let mut items = match map {
            MapFile::Wrapped { items } | MapFile::Bare(items) => items,
        };
        match items.remove(key) {
            Some(value @ Value::Object(_)) => {
                let item = serde_json::from_value(value)
                    .with_context(|| format!("invalid preview entry {:?}", key))?;
                Ok(Some(item))
            }
            _ => Ok(None),
        }
    }
}

/// Writes the preview map for `notes` to `path` and returns the picker
/// input, one `"<n>\t<display>"` line per note in listing order.
pub fn write_search_map(notes: Vec<NoteRecord>, path: &Path) -> Result<String> {
    let mut map = SearchMap::default();
    let mut input = String::new();

    for (i, note) in notes.into_iter().enumerate() {
        let key = (i + 1).to_string();
        input.push_str(&format!("{}\t{}\n", key, note.display()));
        map.items.insert(key.clone(), PreviewItem::new(note, &key));
    }

    let json = serde_json::to_string(&map)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(input)
}

/// Quotes `s` for a POSIX shell.
pub(crate) fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
