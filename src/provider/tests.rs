use super::*;
use crate::domain::DueDate;
use crate::script::ScriptNote;
use crate::store::NoteMeta;
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::{TempDir, tempdir};

// ===========================================
// Fake readers
// ===========================================

#[derive(Clone, Copy, PartialEq)]
enum StoreMode {
    Ok,
    Unavailable,
    Broken,
}

struct FakeStore {
    mode: StoreMode,
    calls: Cell<usize>,
}

impl FakeStore {
    fn new(mode: StoreMode) -> Self {
        Self {
            mode,
            calls: Cell::new(0),
        }
    }

    fn answer<T>(&self, value: T) -> StoreResult<T> {
        self.calls.set(self.calls.get() + 1);
        match self.mode {
            StoreMode::Ok => Ok(value),
            StoreMode::Unavailable => Err(StoreError::Unavailable {
                path: PathBuf::from("/nowhere/NoteStore.sqlite"),
            }),
            StoreMode::Broken => Err(StoreError::Query(rusqlite::Error::QueryReturnedNoRows)),
        }
    }
}

impl StructuredSource for FakeStore {
    fn list_titles(&self, _folder: &str) -> StoreResult<Vec<String>> {
        self.answer(vec!["Work - Alpha".into(), "Work - Beta".into()])
    }

    fn list_folder_names(&self) -> StoreResult<Vec<String>> {
        self.answer(vec!["Personal".into(), "Work".into()])
    }

    fn list_notes_meta(&self, _folder: &str) -> StoreResult<Vec<NoteMeta>> {
        self.answer(vec![NoteMeta {
            pk: 7,
            folder: "Work".into(),
            title: "(Untitled #7)".into(),
            lookup_title: String::new(),
            identifier: Some("UUID-7".into()),
        }])
    }

    fn folder_edges(&self) -> StoreResult<Vec<FolderEdge>> {
        self.answer(vec![FolderEdge::new("Work", "")])
    }
}

struct FakeScript {
    fail: bool,
    calls: Cell<usize>,
}

impl FakeScript {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            calls: Cell::new(0),
        }
    }

    fn answer<T>(&self, value: T) -> ScriptResult<T> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            Err(ScriptError::Failed {
                stderr: "Notes got an error: not running".into(),
            })
        } else {
            Ok(value)
        }
    }
}

impl AutomationSource for FakeScript {
    fn list_titles(&self, _folder: &str) -> ScriptResult<Vec<String>> {
        self.answer(vec!["Home - Keys".into()])
    }

    fn list_folder_names(&self) -> ScriptResult<Vec<String>> {
        self.answer(vec!["Home".into()])
    }

    fn list_notes(&self, _folder: &str) -> ScriptResult<Vec<ScriptNote>> {
        self.answer(vec![ScriptNote {
            id: "x-coredata://p1".into(),
            folder: "Home".into(),
            title: "Keys".into(),
        }])
    }

    fn folder_edges(&self) -> ScriptResult<Vec<FolderEdge>> {
        self.answer(vec![FolderEdge::new("Home", "")])
    }

    fn list_reminders(&self) -> ScriptResult<Vec<Reminder>> {
        self.answer(vec![Reminder {
            id: "r1".into(),
            title: "Call".into(),
            due: DueDate::Missing,
        }])
    }

    fn note_body_by_id(&self, _id: &str) -> ScriptResult<String> {
        self.answer("<div>body</div>".into())
    }

    fn note_body_by_folder_title(&self, _folder: &str, _title: &str) -> ScriptResult<String> {
        self.answer("<div>body</div>".into())
    }
}

struct Setup {
    _dir: TempDir,
    cache_path: PathBuf,
    provider: NotesProvider<FakeStore, FakeScript>,
}

fn setup(backend: Backend, store: StoreMode, script_fails: bool) -> Setup {
    let dir = tempdir().unwrap();
    let cache_path = ResultCache::path_in(dir.path());
    let cache = ResultCache::new(&cache_path, Duration::from_secs(30));
    Setup {
        provider: NotesProvider::new(
            backend,
            FakeStore::new(store),
            FakeScript::new(script_fails),
            cache,
        ),
        cache_path,
        _dir: dir,
    }
}

fn calls(s: &Setup) -> (usize, usize) {
    (
        s.provider.structured.calls.get(),
        s.provider.automation.calls.get(),
    )
}

// ===========================================
// Backend policy
// ===========================================

#[test]
fn auto_prefers_structured_store() {
    let s = setup(Backend::Auto, StoreMode::Ok, false);
    assert_eq!(
        s.provider.list_titles("").unwrap(),
        vec!["Work - Alpha", "Work - Beta"]
    );
    assert_eq!(calls(&s), (1, 0));
}

#[test]
fn auto_falls_back_when_store_unavailable() {
    let s = setup(Backend::Auto, StoreMode::Unavailable, false);
    assert_eq!(s.provider.list_titles("").unwrap(), vec!["Home - Keys"]);
    assert_eq!(calls(&s), (1, 1));
}

#[test]
fn auto_falls_back_when_store_broken() {
    let s = setup(Backend::Auto, StoreMode::Broken, false);
    assert_eq!(s.provider.list_folder_names().unwrap(), vec!["Home"]);
    assert_eq!(calls(&s), (1, 1));
}

#[test]
fn auto_surfaces_automation_error_when_both_fail() {
    let s = setup(Backend::Auto, StoreMode::Unavailable, true);
    let err = s.provider.list_titles("").unwrap_err();
    assert!(matches!(err, ProviderError::Script(_)), "got {:?}", err);
    assert!(err.to_string().contains("Notes got an error: not running"));
    assert!(!s.cache_path.exists(), "nothing cached before a reader succeeds");
}

#[test]
fn structured_mode_propagates_unavailable() {
    let s = setup(Backend::Structured, StoreMode::Unavailable, false);
    let err = s.provider.list_titles("").unwrap_err();
    assert!(
        matches!(err, ProviderError::Store(StoreError::Unavailable { .. })),
        "got {:?}",
        err
    );
    assert!(err.to_string().starts_with("structured notes backend failed"));
    assert_eq!(calls(&s), (1, 0));
    assert!(!s.cache_path.exists());
}

#[test]
fn automation_mode_never_reads_store() {
    let s = setup(Backend::Automation, StoreMode::Ok, false);
    assert_eq!(s.provider.list_titles("").unwrap(), vec!["Home - Keys"]);
    assert_eq!(calls(&s), (0, 1));
}

#[test]
fn automation_mode_surfaces_script_errors() {
    let s = setup(Backend::Automation, StoreMode::Ok, true);
    assert!(matches!(
        s.provider.list_folder_names(),
        Err(ProviderError::Script(ScriptError::Failed { .. }))
    ));
}

// ===========================================
// Caching
// ===========================================

#[test]
fn second_call_is_served_from_cache() {
    let s = setup(Backend::Auto, StoreMode::Ok, false);
    let first = s.provider.list_titles("Work").unwrap();
    let second = s.provider.list_titles("Work").unwrap();
    assert_eq!(first, second);
    assert_eq!(calls(&s), (1, 0));
}

#[test]
fn fallback_result_is_cached() {
    let s = setup(Backend::Auto, StoreMode::Unavailable, false);
    s.provider.list_titles("").unwrap();
    s.provider.list_titles("").unwrap();
    assert_eq!(calls(&s), (1, 1));

    let cache = ResultCache::new(&s.cache_path, Duration::from_secs(30));
    assert_eq!(
        cache.get::<Vec<String>>("note_titles:v1:auto:"),
        Some(vec!["Home - Keys".to_string()])
    );
}

#[test]
fn cache_keys_separate_folders_and_listings() {
    let s = setup(Backend::Auto, StoreMode::Ok, false);
    s.provider.list_titles("").unwrap();
    s.provider.list_titles("Work").unwrap();
    s.provider.list_folder_names().unwrap();
    s.provider.list_notes_meta("").unwrap();
    assert_eq!(calls(&s), (4, 0));
}

#[test]
fn cache_keys_separate_backends() {
    let dir = tempdir().unwrap();
    let path = ResultCache::path_in(dir.path());
    let cache = || ResultCache::new(&path, Duration::from_secs(30));

    let auto = NotesProvider::new(
        Backend::Auto,
        FakeStore::new(StoreMode::Ok),
        FakeScript::new(false),
        cache(),
    );
    auto.list_titles("").unwrap();

    let forced = NotesProvider::new(
        Backend::Automation,
        FakeStore::new(StoreMode::Ok),
        FakeScript::new(false),
        cache(),
    );
    assert_eq!(forced.list_titles("").unwrap(), vec!["Home - Keys"]);
    assert_eq!(forced.automation.calls.get(), 1);
}

#[test]
fn mistyped_cache_entry_is_ignored() {
    let s = setup(Backend::Auto, StoreMode::Ok, false);
    let cache = ResultCache::new(&s.cache_path, Duration::from_secs(30));
    cache.set("note_titles:v1:auto:", &vec![1, 2, 3]);

    assert_eq!(
        s.provider.list_titles("").unwrap(),
        vec!["Work - Alpha", "Work - Beta"]
    );
    assert_eq!(calls(&s), (1, 0));
}

#[test]
fn disabled_cache_always_reads() {
    let provider = NotesProvider::new(
        Backend::Auto,
        FakeStore::new(StoreMode::Ok),
        FakeScript::new(false),
        ResultCache::disabled(),
    );
    provider.list_titles("").unwrap();
    provider.list_titles("").unwrap();
    assert_eq!(provider.structured.calls.get(), 2);
}

// ===========================================
// Normalization and uncached listings
// ===========================================

#[test]
fn store_records_carry_identifier_and_primary_key() {
    let s = setup(Backend::Structured, StoreMode::Ok, false);
    let notes = s.provider.list_notes_meta("").unwrap();
    assert_eq!(
        notes,
        vec![NoteRecord::from_store("Work", "(Untitled #7)", Some("UUID-7".into()), "", 7)]
    );
    assert_eq!(notes[0].script_id(), None);
}

#[test]
fn script_records_carry_script_id_only() {
    let s = setup(Backend::Auto, StoreMode::Unavailable, false);
    let notes = s.provider.list_notes_meta("").unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].script_id(), Some("x-coredata://p1"));
    assert_eq!(notes[0].identifier(), None);
    assert_eq!(notes[0].primary_key(), None);
    assert_eq!(notes[0].display(), "Home - Keys");
}

#[test]
fn cached_records_round_trip() {
    let s = setup(Backend::Structured, StoreMode::Ok, false);
    let first = s.provider.list_notes_meta("").unwrap();
    let second = s.provider.list_notes_meta("").unwrap();
    assert_eq!(first, second);
    assert_eq!(calls(&s), (1, 0));
}

#[test]
fn folder_edges_follow_policy_without_caching() {
    let s = setup(Backend::Auto, StoreMode::Unavailable, false);
    assert_eq!(
        s.provider.folder_edges().unwrap(),
        vec![FolderEdge::new("Home", "")]
    );
    s.provider.folder_edges().unwrap();
    assert_eq!(calls(&s), (2, 2));
    assert!(!s.cache_path.exists());
}

#[test]
fn reminders_always_use_automation() {
    let s = setup(Backend::Structured, StoreMode::Ok, false);
    let reminders = s.provider.list_reminders().unwrap();
    assert_eq!(reminders[0].title, "Call");
    assert_eq!(calls(&s), (0, 1));
}
