//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Environment variables a developer's shell might set that would leak into
/// test runs.
const SCRUBBED_ENV: &[&str] = &[
    "MEMO_NOTES_BACKEND",
    "MEMO_CACHE_TTL_SECONDS",
    "MEMO_NO_CACHE",
    "MEMO_NOTES_DB_PATH",
    "MEMO_TIMING",
    "MEMO_FZF_SHELL",
    "RUST_LOG",
];

/// Fluent wrapper around `assert_cmd::Command` for the `memo` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct MemoCommand {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl MemoCommand {
    /// Creates a new command for the `memo` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.envs
            .push((key.to_string(), value.as_ref().to_string()));
        self
    }

    /// Sets an environment variable to a path.
    pub fn env_path(self, key: &str, path: &Path) -> Self {
        let value = path.to_string_lossy().to_string();
        self.env(key, value)
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("memo").expect("Failed to find memo binary");
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        cmd.envs(self.envs);
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `notes` command.
    pub fn notes(self) -> Self {
        self.args(["notes"])
    }

    /// Configures for `notes --folder <name>`.
    pub fn notes_in(self, folder: &str) -> Self {
        self.args(["notes", "--folder", folder])
    }

    /// Configures for `notes --flist`.
    pub fn flist(self) -> Self {
        self.args(["notes", "--flist"])
    }

    // ===========================================
    // Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--no-cache` to the command.
    pub fn no_cache(self) -> Self {
        self.args(["--no-cache"])
    }
}

impl Default for MemoCommand {
    fn default() -> Self {
        Self::new()
    }
}
