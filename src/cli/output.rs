//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A reminder in listing output.
#[derive(Debug, Serialize)]
pub struct ReminderListing {
    pub id: String,
    pub title: String,
    /// Formatted due moment; undated reminders show the listing time.
    pub due: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}
