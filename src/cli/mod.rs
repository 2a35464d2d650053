//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// memo - list and search your notes and reminders from the terminal
#[derive(Parser, Debug)]
#[command(name = "memo", version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Notes backend: auto, sqlite or applescript (overrides MEMO_NOTES_BACKEND)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Skip the listing cache for this invocation
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List, search and browse notes
    Notes(NotesArgs),

    /// List incomplete reminders
    Rem(RemArgs),

    /// Render one fuzzy-search preview (used by the search UI)
    #[command(hide = true)]
    Preview(PreviewArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `notes` command
#[derive(Parser, Debug)]
pub struct NotesArgs {
    /// Only show notes in folders whose name contains this text
    #[arg(short = 'f', long)]
    pub folder: Option<String>,

    /// List all folders and subfolders
    #[arg(long, conflicts_with_all = ["folder", "search"])]
    pub flist: bool,

    /// Fuzzy search your notes
    #[arg(short, long)]
    pub search: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `rem` command
#[derive(Parser, Debug)]
pub struct RemArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `preview` command
#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Path to the search map written by `notes --search`
    #[arg(long)]
    pub map: PathBuf,

    /// Item key selected in the search UI
    #[arg(long)]
    pub key: String,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
