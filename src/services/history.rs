//! Status history view with relative "time ago" labels.

use serde::Serialize;
use time::OffsetDateTime;

use crate::model::{Slot, StatusEntry, UserProfile};

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const MONTH: i64 = 2_592_000;
const YEAR: i64 = 31_536_000;

#[derive(Debug, Clone, Serialize)]
pub struct HistoryItem {
    #[serde(flatten)]
    pub entry: StatusEntry,
    pub ago: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub slot: Slot,
    pub friend_name: String,
    pub entries: Vec<HistoryItem>,
}

/// Build the history list for `profile`, newest first.
#[must_use]
pub fn history_view(profile: &UserProfile, now: OffsetDateTime) -> HistoryView {
    HistoryView {
        slot: profile.id,
        friend_name: profile.name.clone(),
        entries: profile
            .status_history
            .iter()
            .map(|entry| HistoryItem { entry: entry.clone(), ago: time_ago(entry.timestamp, now) })
            .collect(),
    }
}

/// Coarse relative age. A unit is used only once more than one whole unit
/// has passed, so 90 seconds is "1 minutes ago" but 60 seconds is "60 seconds ago".
#[must_use]
pub fn time_ago(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let seconds = (now - then).whole_seconds().max(0);
    for (unit, label) in [(YEAR, "years"), (MONTH, "months"), (DAY, "days"), (HOUR, "hours"), (MINUTE, "minutes")] {
        if seconds > unit {
            return format!("{} {label} ago", seconds / unit);
        }
    }
    format!("{seconds} seconds ago")
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
