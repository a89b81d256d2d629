use chrono::{Datelike, Duration, NaiveDate};

pub const WEEK_LENGTH_DAYS: i64 = 7;

/// The Monday that starts the week after `date`'s week.
pub fn next_week_start(date: NaiveDate) -> Option<NaiveDate> {
    let offset = WEEK_LENGTH_DAYS - i64::from(date.weekday().num_days_from_monday());
    date.checked_add_signed(Duration::days(offset))
}

/// Day-first display format used in chat messages.
pub fn format_event_date(date: &NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
