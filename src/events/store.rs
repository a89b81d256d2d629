use crate::events::record::{EventRecord, ReminderResult};
use crate::events::source::{read_events_from_path, EventSourceError, LoadReport};
use crate::utils::datetime::{next_week_start, WEEK_LENGTH_DAYS};
use crate::utils::logging::log_event_source;
use chrono::{Duration, NaiveDate};
use std::path::{Path, PathBuf};
use tokio::task::JoinError;

/// An immutable, date-ordered view of the event source at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSnapshot {
    records: Vec<EventRecord>,
}

impl EventSnapshot {
    /// Builds a snapshot, sorting ascending by date. The sort is stable, so
    /// same-day events keep their input order.
    pub fn from_records(mut records: Vec<EventRecord>) -> Self {
        records.sort_by_key(|record| record.date);
        Self { records }
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<EventRecord> {
        self.records
            .iter()
            .filter(|record| record.date == date)
            .cloned()
            .collect()
    }

    /// First event on or after `date`. An event on `date` itself counts.
    pub fn next_event_from(&self, date: NaiveDate) -> Option<EventRecord> {
        self.upcoming(date).next().cloned()
    }

    pub fn next_n_events_from(&self, date: NaiveDate, n: usize) -> Vec<EventRecord> {
        self.upcoming(date).take(n).cloned().collect()
    }

    pub fn reminder_for(&self, date: NaiveDate) -> ReminderResult {
        if let Some(event) = self.first_on(date) {
            return ReminderResult::Today(event.clone());
        }
        match date.checked_add_signed(Duration::days(1)).and_then(|d| self.first_on(d)) {
            Some(event) => ReminderResult::Tomorrow(event.clone()),
            None => ReminderResult::Nothing,
        }
    }

    /// Events from the Monday after `date`'s week through the Sunday that
    /// follows it. A Monday `date` still looks a full week ahead.
    pub fn weekly_summary(&self, date: NaiveDate) -> Vec<EventRecord> {
        let Some(start) = next_week_start(date) else {
            return Vec::new();
        };
        let Some(end) = start.checked_add_signed(Duration::days(WEEK_LENGTH_DAYS - 1)) else {
            return Vec::new();
        };

        self.records
            .iter()
            .filter(|record| record.date >= start && record.date <= end)
            .cloned()
            .collect()
    }

    fn first_on(&self, date: NaiveDate) -> Option<&EventRecord> {
        self.records.iter().find(|record| record.date == date)
    }

    fn upcoming(&self, date: NaiveDate) -> impl Iterator<Item = &EventRecord> {
        // Records are sorted, so everything past the partition point qualifies.
        let start = self.records.partition_point(|record| record.date < date);
        self.records[start..].iter()
    }
}

/// Reads the CSV calendar afresh for every query.
#[derive(Debug, Clone)]
pub struct EventStore {
    path: PathBuf,
}

impl EventStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and sorts the source. Failures degrade to an empty snapshot;
    /// the reason is logged and kept in the report.
    pub fn load_with_report(&self) -> (EventSnapshot, LoadReport) {
        let (records, report) = read_events_from_path(&self.path);
        log_event_source(&self.path, &report);
        (EventSnapshot::from_records(records), report)
    }

    pub fn load(&self) -> EventSnapshot {
        self.load_with_report().0
    }

    /// [`EventStore::load_with_report`] on the blocking thread pool.
    pub async fn load_with_report_blocking(&self) -> (EventSnapshot, LoadReport) {
        let store = self.clone();
        let joined = tokio::task::spawn_blocking(move || store.load_with_report()).await;
        settle_load_task(&self.path, joined)
    }

    pub async fn load_blocking(&self) -> EventSnapshot {
        self.load_with_report_blocking().await.0
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<EventRecord> {
        self.load().events_on(date)
    }

    pub fn next_event_from(&self, date: NaiveDate) -> Option<EventRecord> {
        self.load().next_event_from(date)
    }

    pub fn next_n_events_from(&self, date: NaiveDate, n: usize) -> Vec<EventRecord> {
        self.load().next_n_events_from(date, n)
    }

    pub fn reminder_for(&self, date: NaiveDate) -> ReminderResult {
        self.load().reminder_for(date)
    }

    pub fn weekly_summary(&self, date: NaiveDate) -> Vec<EventRecord> {
        self.load().weekly_summary(date)
    }
}

/// A load task that never finished counts as an unusable source.
fn settle_load_task(
    path: &Path,
    joined: Result<(EventSnapshot, LoadReport), JoinError>,
) -> (EventSnapshot, LoadReport) {
    match joined {
        Ok(loaded) => loaded,
        Err(e) => {
            let error = EventSourceError::LoadTask(e.to_string());
            tracing::error!("EVENT_SOURCE: {} unusable, serving no events: {}", path.display(), error);
            (EventSnapshot::default(), LoadReport::failed(error))
        }
    }
}
