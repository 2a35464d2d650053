//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::{MemoCommand, TestStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary home.
///
/// Holds the fixture notes database and keeps memo's config and cache
/// directories inside the temp dir, which is removed on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
    store: TestStore,
}

impl TestEnv {
    /// Creates a new environment with an empty notes database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        let store = TestStore::create(&root.join("NoteStore.sqlite"));
        Self {
            _temp_dir: temp_dir,
            root,
            store,
        }
    }

    /// Returns the fixture notes database.
    pub fn store(&self) -> &TestStore {
        &self.store
    }

    /// Returns the path to the notes database.
    pub fn db_path(&self) -> &Path {
        self.store.path()
    }

    /// Returns the `XDG_CACHE_HOME` used by commands.
    pub fn cache_home(&self) -> PathBuf {
        self.root.join("cache")
    }

    /// Returns the listing cache file memo writes.
    pub fn cache_file(&self) -> PathBuf {
        self.cache_home().join("memo").join("cache_v1.json")
    }

    /// Returns the `XDG_CONFIG_HOME` used by commands.
    pub fn config_home(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Writes `contents` as memo's config file.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.config_home().join("memo");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Creates a command reading the fixture database through the
    /// structured backend, with config and cache isolated.
    pub fn cmd(&self) -> MemoCommand {
        MemoCommand::new()
            .env_path("HOME", &self.root)
            .env_path("XDG_CONFIG_HOME", &self.config_home())
            .env_path("XDG_CACHE_HOME", &self.cache_home())
            .env_path("MEMO_NOTES_DB_PATH", self.db_path())
            .env("MEMO_NOTES_BACKEND", "sqlite")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_database() {
        let env = TestEnv::new();
        assert!(env.db_path().exists(), "notes database should exist");
        assert!(env.db_path().starts_with(&env.root));
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root.clone()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_cache_file_under_cache_home() {
        let env = TestEnv::new();
        assert!(env.cache_file().starts_with(env.cache_home()));
        assert!(env.cache_file().ends_with("memo/cache_v1.json"));
    }
}
