//! Reads notes and reminders through the host's scripting interface.
//!
//! Each listing sends one script to an out-of-process interpreter and parses
//! its newline-delimited output. The interpreter is behind [`ScriptRunner`]
//! so parsing can be exercised without the host application.

mod notes;
mod reminders;


use std::process::Command;
use thiserror::Error;

use crate::infra::Timer;

pub use notes::ScriptNote;

/// Separator between fields of one output record.
pub const FIELD_SEP: &str = "|||";

// ===========================================
// ScriptError Type
// ===========================================

/// Errors from running or parsing automation scripts.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The interpreter could not be started.
    #[error("failed to launch '{program}'")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The script ran and exited with a failure status.
    #[error("automation script execution failed.{}", host_detail(.stderr))]
    Failed { stderr: String },

    /// A non-blank output line did not have the expected fields.
    #[error("unexpected automation output line: {line:?}")]
    Malformed { line: String },
}

fn host_detail(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n\n{}", stderr)
    }
}

/// Result type for automation operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

// ===========================================
// ScriptRunner
// ===========================================

/// Executes script source and returns its standard output.
pub trait ScriptRunner {
    fn run(&self, script: &str) -> ScriptResult<String>;
}

/// Runs scripts with `osascript -e`.
#[derive(Debug, Clone)]
pub struct Osascript {
    program: String,
}

impl Osascript {
    pub fn new() -> Self {
        Self {
            program: "osascript".to_string(),
        }
    }

    /// Uses a different interpreter binary with the same `-e` convention.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Osascript {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptRunner for Osascript {
    fn run(&self, script: &str) -> ScriptResult<String> {
        let _timer = Timer::start(format!("{}/run", self.program));
        let output = Command::new(&self.program)
            .arg("-e")
            .arg(script)
            .output()
            .map_err(|source| ScriptError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ScriptError::Failed {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

// ===========================================
// ScriptNotes
// ===========================================

/// Notes and reminders reader over a [`ScriptRunner`].
#[derive(Debug, Clone, Default)]
pub struct ScriptNotes<R> {
    runner: R,
}

impl<R: ScriptRunner> ScriptNotes<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Returns the underlying runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }
}

// ===========================================
// Shared Helpers
// ===========================================

/// Escapes text for use inside a double-quoted script string literal.
pub fn escape_script_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Splits output into trimmed-of-line-ending, non-blank lines.
pub(crate) fn output_lines(stdout: &str) -> impl Iterator<Item = &str> {
    stdout
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
}

/// Splits a record into exactly `n` fields; the last field keeps any extra
/// separators.
pub(crate) fn split_fields(line: &str, n: usize) -> ScriptResult<Vec<&str>> {
    let fields: Vec<&str> = line.splitn(n, FIELD_SEP).collect();
    if fields.len() != n {
        return Err(ScriptError::Malformed {
            line: line.to_string(),
        });
    }
    Ok(fields)
}
