//! Due-date text parsing.
//!
//! Reminders keep `dueDate` as the raw text the storage layer handed us.
//! Everything that needs a point in time goes through [`parse_due_date`].
//!
//! # Invariants
//! - Parsing never fails loudly; unusable text yields `None`.
//! - Zone-less inputs are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static EPOCH_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid epoch number regex")
});

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses due-date text into a UTC instant.
///
/// Accepted shapes, tried in order:
/// - numeric text (optional sign, fraction or exponent) as Unix epoch
///   milliseconds, fraction truncated toward zero;
/// - RFC 3339 with offset (`2025-12-31T10:00:00.000Z`);
/// - naive date-time (`2025-12-31T10:00`, seconds/fraction optional);
/// - date only (`2025-12-31`), anchored to midnight UTC.
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if EPOCH_NUMBER_RE.is_match(trimmed) {
        let millis = parse_epoch_millis(trimmed)?;
        return Utc.timestamp_millis_opt(millis).single();
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_epoch_millis(text: &str) -> Option<i64> {
    if let Ok(millis) = text.parse::<i64>() {
        return Some(millis);
    }
    let value = text.parse::<f64>().ok().filter(|value| value.is_finite())?;
    let truncated = value.trunc();
    if truncated.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

/// Parses an optional due-date field.
pub fn parse_optional_due_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(parse_due_date)
}
