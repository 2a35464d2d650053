//! Folder tree output for `notes --flist`.

use anyhow::{Context, Result};
use std::io::Write;

use super::write_json;
use crate::cli::output::OutputFormat;
use crate::domain::render_tree;
use crate::provider::{AutomationSource, NotesProvider, StructuredSource};

/// Writes the folder hierarchy as an indented tree, or the raw edges as JSON.
pub fn write_folder_tree<S, A, W>(
    provider: &NotesProvider<S, A>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    S: StructuredSource,
    A: AutomationSource,
    W: Write,
{
    let edges = provider
        .folder_edges()
        .context("failed to read folder hierarchy")?;

    match format {
        OutputFormat::Human => {
            writeln!(out, "\nFolders and subfolders in Notes:")?;
            writeln!(out, "\n{}", render_tree(&edges))?;
        }
        OutputFormat::Json => write_json(out, edges)?,
    }
    Ok(())
}
