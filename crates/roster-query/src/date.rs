//! Lenient calendar-date reading for the date sort.
//!
//! Record feeds carry dates in whatever shape the backend or the form
//! produced. Anything that does not parse is reported as `None` and sorts
//! last; nothing here fails.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::value::{Number, Value};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Parses a calendar date from text.
///
/// Accepts ISO dates, RFC 3339 timestamps (the date part in the timestamp's
/// own offset), naive date-times, and common day-first and month-name
/// layouts. Returns `None` when nothing matches.
///
/// ```
/// use chrono::NaiveDate;
/// use roster_query::parse_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 2, 11);
/// assert_eq!(parse_date("2024-02-11"), expected);
/// assert_eq!(parse_date("11/02/2024"), expected);
/// assert_eq!(parse_date("11 Feb 2024"), expected);
/// assert_eq!(parse_date("sometime soon"), None);
/// ```
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

/// Reads a field value as a calendar date.
///
/// Numbers are taken as milliseconds since the Unix epoch (UTC).
pub fn value_to_date(value: &Value<'_>) -> Option<NaiveDate> {
    match value {
        Value::Date(d) => Some(*d),
        Value::Text(s) => parse_date(s),
        Value::Number(n) => epoch_millis(*n),
        Value::Bool(_) | Value::None => None,
    }
}

fn epoch_millis(n: Number) -> Option<NaiveDate> {
    let millis = match n {
        Number::I64(v) => v,
        Number::U64(v) => i64::try_from(v).ok()?,
        Number::F64(v) if v.is_finite() => v as i64,
        Number::F64(_) => return None,
    };
    DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}
