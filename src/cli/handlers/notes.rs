//! Notes command handler.

use anyhow::{Context, Result};
use std::io::Write;

use super::{build_provider, folders, search, write_json};
use crate::cli::NotesArgs;
use crate::cli::config::Settings;
use crate::cli::output::OutputFormat;
use crate::infra::Timer;
use crate::provider::{AutomationSource, NotesProvider, StructuredSource};

pub fn handle_notes(args: &NotesArgs, settings: &Settings) -> Result<()> {
    let _timer = Timer::start("notes/total");
    let provider = build_provider(settings);

    if args.search {
        let folder = args.folder.as_deref().unwrap_or("");
        return search::run_search(&provider, folder, &settings.fzf_shell);
    }

    let mut out = std::io::stdout().lock();
    if args.flist {
        return folders::write_folder_tree(&provider, args.format, &mut out);
    }
    write_note_listing(&provider, args.folder.as_deref(), args.format, &mut out)
}

/// Writes the numbered note listing, optionally restricted to `folder`.
///
/// A folder must name an existing folder exactly; otherwise a hint is
/// printed instead of an empty listing.
pub fn write_note_listing<S, A, W>(
    provider: &NotesProvider<S, A>,
    folder: Option<&str>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    S: StructuredSource,
    A: AutomationSource,
    W: Write,
{
    if let Some(folder) = folder {
        let names = {
            let _timer = Timer::start("notes/folder_validate");
            provider
                .list_folder_names()
                .context("failed to list folders")?
        };
        if !names.iter().any(|name| name == folder) {
            writeln!(out, "\nThe folder does not exist.")?;
            writeln!(out, "\nUse 'memo notes --flist' to see your folders")?;
            return Ok(());
        }
    }

    let filter = folder.unwrap_or("");
    match format {
        OutputFormat::Human => {
            let titles = {
                let _timer = Timer::start("notes/fetch_titles");
                provider
                    .list_titles(filter)
                    .context("failed to list notes")?
            };

            if titles.is_empty() {
                writeln!(out, "\nNo notes found.")?;
                return Ok(());
            }

            match folder {
                Some(folder) => writeln!(out, "\nYour notes in folder {}:\n", folder)?,
                None => writeln!(out, "\nAll your notes:\n")?,
            }
            for (i, title) in titles.iter().enumerate() {
                writeln!(out, "{}. {}", i + 1, title)?;
            }
        }
        OutputFormat::Json => {
            let notes = provider
                .list_notes_meta(filter)
                .context("failed to list notes")?;
            write_json(out, notes)?;
        }
    }
    Ok(())
}
