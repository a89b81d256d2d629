use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// The one timezone in which every event date and "today" are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceZone {
    tz: Tz,
}

impl ReferenceZone {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Calendar date of `instant` as seen in the reference zone.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.tz.from_utc_datetime(&instant.naive_utc()).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }
}

impl Default for ReferenceZone {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Rome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_of_follows_the_zone_not_utc() {
        let zone = ReferenceZone::new(chrono_tz::Europe::Rome);
        // 23:30 UTC in June is already 01:30 the next day in Rome.
        let instant = Utc.with_ymd_and_hms(2024, 6, 10, 23, 30, 0).unwrap();
        assert_eq!(zone.date_of(instant), NaiveDate::from_ymd_opt(2024, 6, 11).unwrap());

        // In January Rome is UTC+1, so 22:30 UTC is still 23:30 the same day.
        let instant = Utc.with_ymd_and_hms(2024, 1, 10, 22, 30, 0).unwrap();
        assert_eq!(zone.date_of(instant), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn test_utc_zone_matches_utc_date() {
        let zone = ReferenceZone::new(chrono_tz::UTC);
        let instant = Utc.with_ymd_and_hms(2024, 6, 10, 23, 30, 0).unwrap();
        assert_eq!(zone.date_of(instant), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
    }
}
