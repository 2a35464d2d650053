//! Reminders and their due dates.

use chrono::{DateTime, Duration, Local};

/// Display format for due timestamps.
const DUE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SECONDS_PER_DAY: i64 = 86_400;

/// An incomplete reminder as reported by the automation host.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: String,
    pub title: String,
    pub due: DueDate,
}

/// A reminder's due date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DueDate {
    /// A concrete due moment.
    At(DateTime<Local>),
    /// The reminder has no due date.
    Missing,
    /// The host reported a value that is not a timestamp.
    Unparseable,
}

impl DueDate {
    /// Parses the host's due field: epoch seconds (either `.` or `,` as the
    /// decimal separator) or the literal `None`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "None" {
            return DueDate::Missing;
        }

        let Ok(secs) = raw.replace(',', ".").parse::<f64>() else {
            return DueDate::Unparseable;
        };
        if !secs.is_finite() {
            return DueDate::Unparseable;
        }

        let whole = secs.floor();
        let nanos = ((secs - whole) * 1e9) as u32;
        match DateTime::from_timestamp(whole as i64, nanos) {
            Some(utc) => DueDate::At(utc.with_timezone(&Local)),
            None => DueDate::Unparseable,
        }
    }

    /// The moment used for display and urgency.
    ///
    /// A missing due date resolves to `now`, so undated reminders show
    /// today's date. This mirrors how the listing has always behaved; it is
    /// not a real due date.
    pub fn effective(&self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        match self {
            DueDate::At(at) => Some(*at),
            DueDate::Missing => Some(now),
            DueDate::Unparseable => None,
        }
    }

    /// Formats the due date for listings.
    pub fn display_at(&self, now: DateTime<Local>) -> String {
        match self.effective(now) {
            Some(at) => at.format(DUE_FORMAT).to_string(),
            None => "None".to_string(),
        }
    }
}

/// Describes how soon `due` is, counting whole days from yesterday.
pub fn due_label(due: DateTime<Local>, now: DateTime<Local>) -> String {
    let reference = now - Duration::days(1);
    let days = (due - reference).num_seconds().div_euclid(SECONDS_PER_DAY);

    if days <= 1 {
        if days > 0 {
            format!("Due on {} day", days)
        } else {
            "Due today".to_string()
        }
    } else {
        format!("Due on {} days", days)
    }
}
