use crate::events::record::EventRecord;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The only accepted date layout in the event source.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_COLUMNS: &[&str] = &["data", "date"];
const TITLE_COLUMNS: &[&str] = &["event", "title"];
const DESCRIPTION_COLUMNS: &[&str] = &["descrizione", "description"];

#[derive(Debug, Error)]
pub enum EventSourceError {
    #[error("cannot open event source {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read event source header: {0}")]
    Header(#[source] csv::Error),
    #[error("event source has no '{0}' column")]
    MissingColumn(&'static str),
    #[error("event source load task failed: {0}")]
    LoadTask(String),
}

/// A row excluded from the collection, with its 1-based CSV line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub line: u64,
    pub reason: String,
}

/// Diagnostics gathered while reading the event source.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub dropped: Vec<DroppedRow>,
    pub error: Option<EventSourceError>,
}

impl LoadReport {
    pub fn is_healthy(&self) -> bool {
        self.error.is_none()
    }

    pub fn rows_dropped(&self) -> usize {
        self.dropped.len()
    }

    pub(crate) fn failed(error: EventSourceError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    fn drop_row(&mut self, line: u64, reason: impl Into<String>) {
        self.dropped.push(DroppedRow {
            line,
            reason: reason.into(),
        });
    }
}

/// Parses a date cell with [`DATE_FORMAT`], ignoring surrounding whitespace.
pub fn parse_event_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
}

struct ColumnMap {
    date: usize,
    title: usize,
    description: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, EventSourceError> {
        let find = |names: &[&str], label: &'static str| {
            headers
                .iter()
                .position(|header| {
                    let header = header.trim();
                    names.iter().any(|name| header.eq_ignore_ascii_case(name))
                })
                .ok_or(EventSourceError::MissingColumn(label))
        };

        Ok(Self {
            date: find(DATE_COLUMNS, DATE_COLUMNS[0])?,
            title: find(TITLE_COLUMNS, TITLE_COLUMNS[0])?,
            description: find(DESCRIPTION_COLUMNS, DESCRIPTION_COLUMNS[0])?,
        })
    }
}

/// Reads event rows in input order. Malformed rows are skipped and noted in
/// the report; a header problem yields no rows at all.
pub fn read_events<R: Read>(reader: R) -> (Vec<EventRecord>, LoadReport) {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = match csv_reader.headers() {
        Ok(headers) => match ColumnMap::from_headers(headers) {
            Ok(columns) => columns,
            Err(e) => return (Vec::new(), LoadReport::failed(e)),
        },
        Err(e) => return (Vec::new(), LoadReport::failed(EventSourceError::Header(e))),
    };

    let mut report = LoadReport::default();
    let mut events = Vec::new();

    for (index, row) in csv_reader.records().enumerate() {
        report.rows_read += 1;
        // Header occupies line 1.
        let fallback_line = index as u64 + 2;

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                report.drop_row(fallback_line, format!("unreadable row: {e}"));
                continue;
            }
        };
        let line = row.position().map_or(fallback_line, |p| p.line());

        let raw_date = row.get(columns.date).unwrap_or("");
        let date = match parse_event_date(raw_date) {
            Ok(date) => date,
            Err(_) => {
                report.drop_row(line, format!("invalid date '{raw_date}'"));
                continue;
            }
        };

        let title = row.get(columns.title).unwrap_or("").trim();
        if title.is_empty() {
            report.drop_row(line, "empty title");
            continue;
        }

        let description = row.get(columns.description).unwrap_or("").trim();
        events.push(EventRecord::new(date, title, description));
    }

    report.rows_kept = events.len();
    (events, report)
}

/// Opens `path` and reads it with [`read_events`].
pub fn read_events_from_path(path: &Path) -> (Vec<EventRecord>, LoadReport) {
    match File::open(path) {
        Ok(file) => read_events(file),
        Err(source) => (
            Vec::new(),
            LoadReport::failed(EventSourceError::Open {
                path: path.to_path_buf(),
                source,
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reads_rows_in_input_order() {
        let csv = "data,event,descrizione\n2024-06-12,B,second\n2024-06-10,A,first\n";
        let (events, report) = read_events(csv.as_bytes());

        assert!(report.is_healthy());
        assert_eq!(report.rows_read, 2);
        assert_eq!(report.rows_kept, 2);
        assert_eq!(events[0], EventRecord::new(date(2024, 6, 12), "B", "second"));
        assert_eq!(events[1], EventRecord::new(date(2024, 6, 10), "A", "first"));
    }

    #[test]
    fn test_english_headers_and_column_order() {
        let csv = "Title,Description,Date\nRace,Main event,2024-07-01\n";
        let (events, report) = read_events(csv.as_bytes());

        assert!(report.is_healthy());
        assert_eq!(events, vec![EventRecord::new(date(2024, 7, 1), "Race", "Main event")]);
    }

    #[test]
    fn test_invalid_dates_are_dropped_with_line_numbers() {
        let csv = "data,event,descrizione\n2024-06-10,A,\n10/06/2024,B,\n2024-02-30,C,\n,D,\n2024-06-11,E,\n";
        let (events, report) = read_events(csv.as_bytes());

        assert_eq!(events.len(), 2);
        assert_eq!(report.rows_read, 5);
        assert_eq!(report.rows_dropped(), 3);
        let lines: Vec<u64> = report.dropped.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
    }

    #[test]
    fn test_datetime_values_are_rejected() {
        let (events, report) = read_events("data,event,descrizione\n2024-06-10 10:00,A,x\n".as_bytes());
        assert!(events.is_empty());
        assert_eq!(report.rows_dropped(), 1);
    }

    #[test]
    fn test_empty_title_is_dropped_and_description_may_be_empty() {
        let csv = "data,event,descrizione\n2024-06-10,,x\n2024-06-11,B\n";
        let (events, report) = read_events(csv.as_bytes());

        assert_eq!(events, vec![EventRecord::new(date(2024, 6, 11), "B", "")]);
        assert_eq!(report.dropped[0].reason, "empty title");
    }

    #[test]
    fn test_missing_column_fails_whole_load() {
        let csv = "data,event\n2024-06-10,A\n";
        let (events, report) = read_events(csv.as_bytes());

        assert!(events.is_empty());
        assert!(matches!(report.error, Some(EventSourceError::MissingColumn("descrizione"))));
    }

    #[test]
    fn test_missing_file_reports_open_error() {
        let (events, report) = read_events_from_path(Path::new("/nonexistent/eventi.csv"));
        assert!(events.is_empty());
        assert!(matches!(report.error, Some(EventSourceError::Open { .. })));
    }
}
