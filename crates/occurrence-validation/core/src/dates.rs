//! Date and time parsing for `<input type="date">` / `<input type="time">` values

use crate::messages;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Lower bound and messages for a date field that must lie in `[min_year-01-01, today]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub min_year: i32,
    pub too_old: &'static str,
    pub future: &'static str,
}

pub const BIRTH_DATE: DateBounds = DateBounds {
    min_year: 1900,
    too_old: messages::BIRTH_DATE_TOO_OLD,
    future: messages::BIRTH_DATE_FUTURE,
};

pub const INTERNMENT_DATE: DateBounds = DateBounds {
    min_year: 2000,
    too_old: messages::INTERNMENT_DATE_TOO_OLD,
    future: messages::INTERNMENT_DATE_FUTURE,
};

pub const OCCURRENCE_DATE: DateBounds = DateBounds {
    min_year: 2010,
    too_old: messages::OCCURRENCE_DATE_TOO_OLD,
    future: messages::OCCURRENCE_DATE_FUTURE,
};

impl DateBounds {
    pub fn check(&self, date: NaiveDate, today: NaiveDate) -> Result<(), &'static str> {
        if date > today {
            Err(self.future)
        } else if date.year() < self.min_year {
            Err(self.too_old)
        } else {
            Ok(())
        }
    }
}

/// Parses `YYYY-MM-DD`. Blank input is `Ok(None)`.
pub fn parse_date(value: &str) -> Result<Option<NaiveDate>, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| messages::INVALID_DATE)
}

/// Parses `HH:MM` or `HH:MM:SS`, dropping seconds. Blank input is `Ok(None)`.
pub fn parse_time(value: &str) -> Result<Option<NaiveTime>, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let time = NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| messages::INVALID_TIME)?;

    Ok(truncate_to_minute(time))
}

/// Time-of-day at minute granularity
pub fn truncate_to_minute(time: NaiveTime) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case("2024-02-29", Some(date(2024, 2, 29)))]
    #[case(" 1990-05-17 ", Some(date(1990, 5, 17)))]
    #[case("", None)]
    #[case("   ", None)]
    fn test_parse_date(#[case] input: &str, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_date(input), Ok(expected));
    }

    #[rstest]
    #[case("2023-02-29")]
    #[case("17/05/1990")]
    #[case("yesterday")]
    fn test_parse_date_rejects_garbage(#[case] input: &str) {
        assert_eq!(parse_date(input), Err(messages::INVALID_DATE));
    }

    #[test]
    fn test_parse_time_drops_seconds() {
        let parsed = parse_time("14:30:59").unwrap().unwrap();
        assert_eq!(parsed, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(parse_time("07:05").unwrap(), NaiveTime::from_hms_opt(7, 5, 0));
        assert_eq!(parse_time(""), Ok(None));
        assert_eq!(parse_time("25:00"), Err(messages::INVALID_TIME));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let today = date(2024, 6, 15);
        assert!(BIRTH_DATE.check(date(1900, 1, 1), today).is_ok());
        assert!(BIRTH_DATE.check(today, today).is_ok());
        assert_eq!(
            BIRTH_DATE.check(date(1899, 12, 31), today),
            Err(messages::BIRTH_DATE_TOO_OLD)
        );
        assert_eq!(
            BIRTH_DATE.check(date(2024, 6, 16), today),
            Err(messages::BIRTH_DATE_FUTURE)
        );
    }
}
