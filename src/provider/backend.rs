//! Backend selection policy.

use std::fmt;

/// Which reader(s) a listing may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Try the structured store, fall back to automation on any failure.
    #[default]
    Auto,
    /// Structured store only; failures reach the caller.
    Structured,
    /// Automation scripts only.
    Automation,
}

impl Backend {
    /// Interprets a configuration value. Matching ignores case and
    /// surrounding whitespace; unrecognized values select `Auto`.
    pub fn from_setting(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "sqlite" | "sql" | "db" | "structured" => Backend::Structured,
            "applescript" | "osascript" | "as" | "automation" => Backend::Automation,
            _ => Backend::Auto,
        }
    }

    /// Stable name used in cache keys and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Auto => "auto",
            Backend::Structured => "sqlite",
            Backend::Automation => "applescript",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
