//! Timestamp parsing for log cells
//!
//! Accepts the textual formats commonly found in exported analytics logs and
//! Unix epoch values. Everything is normalised to UTC; naive values are taken
//! to already be in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Epoch values longer than this many digits are milliseconds
const EPOCH_SECONDS_MAX_DIGITS: usize = 10;

/// Shortest digit string treated as an epoch when guessing a column layout.
/// Nine digits is 1973-03-03; shorter numbers are identifiers.
pub const MIN_LAYOUT_EPOCH_DIGITS: usize = 9;

/// How a cell was recognised as a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimestampKind {
    Epoch,
    Textual,
}

/// Parse a timestamp cell, returning `None` if no known format matches
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if is_digits(value) {
        return parse_epoch(value);
    }
    parse_textual_timestamp(value)
}

/// Classify a cell for column-layout detection.
///
/// Unlike [`parse_timestamp`], short integers are rejected so that numeric
/// visitor or session identifiers are not mistaken for epoch seconds.
pub fn timestamp_kind(raw: &str) -> Option<TimestampKind> {
    let value = raw.trim();
    if is_digits(value) {
        return (value.len() >= MIN_LAYOUT_EPOCH_DIGITS && parse_epoch(value).is_some())
            .then_some(TimestampKind::Epoch);
    }
    parse_textual_timestamp(value).map(|_| TimestampKind::Textual)
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a date or date-time written out as text; epoch integers are rejected
pub fn parse_textual_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() || is_digits(value) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_epoch(digits: &str) -> Option<DateTime<Utc>> {
    let number: i64 = digits.parse().ok()?;
    if digits.len() > EPOCH_SECONDS_MAX_DIGITS {
        DateTime::from_timestamp_millis(number)
    } else {
        DateTime::from_timestamp(number, 0)
    }
}
