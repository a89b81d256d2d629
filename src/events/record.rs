use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single calendar entry.
///
/// `date` is a plain calendar date. It carries no offset of its own and is
/// always read in the bot's reference timezone, so it must only ever be
/// compared with dates produced by [`crate::services::timezone`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
}

impl EventRecord {
    pub fn new(date: NaiveDate, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Outcome of the daily reminder selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderResult {
    /// First event scheduled on the reference date itself.
    Today(EventRecord),
    /// Nothing today, first event scheduled the day after.
    Tomorrow(EventRecord),
    /// Neither today nor tomorrow has anything scheduled.
    Nothing,
}

impl ReminderResult {
    pub fn event(&self) -> Option<&EventRecord> {
        match self {
            ReminderResult::Today(event) | ReminderResult::Tomorrow(event) => Some(event),
            ReminderResult::Nothing => None,
        }
    }
}
