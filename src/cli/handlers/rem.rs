//! Reminders command handler.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::io::Write;

use super::{build_provider, write_json};
use crate::cli::RemArgs;
use crate::cli::config::Settings;
use crate::cli::output::{OutputFormat, ReminderListing};
use crate::domain::{Reminder, due_label};

pub fn handle_rem(args: &RemArgs, settings: &Settings) -> Result<()> {
    let provider = build_provider(settings);
    let reminders = provider
        .list_reminders()
        .context("failed to list reminders")?;

    let mut out = std::io::stdout().lock();
    write_reminders(&reminders, Local::now(), args.format, &mut out)?;
    Ok(())
}

fn listing(reminder: &Reminder, now: DateTime<Local>) -> ReminderListing {
    ReminderListing {
        id: reminder.id.clone(),
        title: reminder.title.clone(),
        due: reminder.due.display_at(now),
        label: reminder.due.effective(now).map(|due| due_label(due, now)),
    }
}

/// Writes numbered reminders with their due labels as of `now`.
pub fn write_reminders<W: Write>(
    reminders: &[Reminder],
    now: DateTime<Local>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let listings: Vec<ReminderListing> = reminders.iter().map(|r| listing(r, now)).collect();

    match format {
        OutputFormat::Human => {
            if listings.is_empty() {
                writeln!(out, "\nNo reminders found.")?;
                return Ok(());
            }
            writeln!(out, "\nYour Reminders:\n")?;
            for (i, r) in listings.iter().enumerate() {
                match &r.label {
                    Some(label) => writeln!(out, "{}. {} | {} | {}", i + 1, r.title, r.due, label)?,
                    None => writeln!(out, "{}. {} | {}", i + 1, r.title, r.due)?,
                }
            }
        }
        OutputFormat::Json => write_json(out, listings)?,
    }
    Ok(())
}
