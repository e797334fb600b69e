//! Field rules
//!
//! Each rule takes the raw control value(s) plus the reference "now" and
//! returns the message to display on failure.

use crate::dates::{self, parse_date, parse_time, DateBounds};
use crate::messages;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// Digits only, at least five (ASCII, like the browser's `\d`)
static NUMERIC_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5,}$").expect("numeric id pattern is valid"));

/// Value must contain something other than whitespace
pub fn validate_not_blank(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err(message)
    } else {
        Ok(())
    }
}

/// Trimmed value must be five or more digits
pub fn validate_numeric_id(value: &str, message: &'static str) -> Result<(), &'static str> {
    if NUMERIC_ID_REGEX.is_match(value.trim()) {
        Ok(())
    } else {
        Err(message)
    }
}

/// Date must parse and lie within `bounds` relative to `today`. Blank is accepted.
pub fn validate_date_in_range(
    value: &str,
    today: NaiveDate,
    bounds: &DateBounds,
) -> Result<(), &'static str> {
    match parse_date(value)? {
        Some(date) => bounds.check(date, today),
        None => Ok(()),
    }
}

pub fn validate_patient_name(value: &str) -> Result<(), &'static str> {
    validate_not_blank(value, messages::PATIENT_NAME_BLANK)
}

pub fn validate_description(value: &str) -> Result<(), &'static str> {
    validate_not_blank(value, messages::DESCRIPTION_BLANK)
}

pub fn validate_immediate_action(value: &str) -> Result<(), &'static str> {
    validate_not_blank(value, messages::IMMEDIATE_ACTION_BLANK)
}

pub fn validate_attendance(value: &str) -> Result<(), &'static str> {
    validate_numeric_id(value, messages::ATTENDANCE_DIGITS)
}

pub fn validate_record(value: &str) -> Result<(), &'static str> {
    validate_numeric_id(value, messages::RECORD_DIGITS)
}

pub fn validate_birth_date(value: &str, today: NaiveDate) -> Result<(), &'static str> {
    validate_date_in_range(value, today, &dates::BIRTH_DATE)
}

pub fn validate_internment_date(value: &str, today: NaiveDate) -> Result<(), &'static str> {
    validate_date_in_range(value, today, &dates::INTERNMENT_DATE)
}

pub fn validate_occurrence_date(value: &str, today: NaiveDate) -> Result<(), &'static str> {
    validate_date_in_range(value, today, &dates::OCCURRENCE_DATE)
}

/// Internment cannot precede birth. Passes while either date is blank or malformed;
/// the single-date rules report those.
pub fn validate_birth_internment_date(birth: &str, internment: &str) -> Result<(), &'static str> {
    match (parse_date(birth), parse_date(internment)) {
        (Ok(Some(birth)), Ok(Some(internment))) if internment < birth => {
            Err(messages::INTERNMENT_BEFORE_BIRTH)
        }
        _ => Ok(()),
    }
}

/// An occurrence dated today cannot have happened later than the current minute.
///
/// `now` is the wall clock in the form's time zone. Any other date places no
/// constraint on the time.
pub fn validate_occurrence_time(
    date: &str,
    time: &str,
    now: NaiveDateTime,
) -> Result<(), &'static str> {
    let Some(time) = parse_time(time)? else {
        return Ok(());
    };
    let Ok(Some(date)) = parse_date(date) else {
        return Ok(());
    };

    if date != now.date() {
        return Ok(());
    }

    match dates::truncate_to_minute(now.time()) {
        Some(current) if time > current => Err(messages::OCCURRENCE_TIME_FUTURE),
        _ => Ok(()),
    }
}
