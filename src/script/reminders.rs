//! Incomplete reminders via the automation host.

use super::{FIELD_SEP, ScriptError, ScriptNotes, ScriptResult, ScriptRunner, output_lines};
use crate::domain::{DueDate, Reminder};

/// Emits `id|||name|||due` per incomplete reminder, where `due` is epoch
/// seconds computed from the host's clock at run time, or `None`.
fn reminders_script() -> String {
    format!(
        r#"
set prevTIDs to AppleScript's text item delimiters
set AppleScript's text item delimiters to linefeed
set outLines to {{}}
set nowEpoch to (do shell script "date +%s") as real

tell application "Reminders"
    repeat with eachRem in (reminders whose completed is false)
        set dueDateRem to due date of eachRem
        if dueDateRem is not missing value then
            set timeStamp to ((dueDateRem - (current date)) + nowEpoch) as text
        else
            set timeStamp to "None"
        end if
        set end of outLines to ((id of eachRem) & "{sep}" & (name of eachRem) & "{sep}" & timeStamp)
    end repeat
end tell

set output to outLines as text
set AppleScript's text item delimiters to prevTIDs
return output
"#,
        sep = FIELD_SEP
    )
}

impl<R: ScriptRunner> ScriptNotes<R> {
    /// Lists incomplete reminders in host order.
    ///
    /// The id is the first field and the due date the last; anything between
    /// them is the title, separators included.
    pub fn list_reminders(&self) -> ScriptResult<Vec<Reminder>> {
        let stdout = self.runner.run(&reminders_script())?;
        output_lines(&stdout)
            .map(|line| {
                let malformed = || ScriptError::Malformed {
                    line: line.to_string(),
                };
                let (head, due) = line.rsplit_once(FIELD_SEP).ok_or_else(malformed)?;
                let (id, title) = head.split_once(FIELD_SEP).ok_or_else(malformed)?;
                Ok(Reminder {
                    id: id.trim().to_string(),
                    title: title.trim().to_string(),
                    due: DueDate::parse(due),
                })
            })
            .collect()
    }
}
