// Date utility functions
// Helpers for the ISO-8601 strings carried in data-date attributes

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Calendar day of an ISO-8601 timestamp or date.
pub fn iso_date_part(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Format a date the way the calendar REST route expects it.
pub fn format_query_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` date input value; empty input means no bound.
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Index of the chronologically first item, comparing ISO strings lexically.
///
/// Lexical order equals chronological order for same-format timestamps.
/// Items without a date sort after every dated item; ties keep the first.
pub fn earliest_iso_index<S: AsRef<str>>(dates: &[Option<S>]) -> Option<usize> {
    let mut best: Option<(usize, Option<&str>)> = None;
    for (index, date) in dates.iter().enumerate() {
        let date = date.as_ref().map(|d| d.as_ref());
        best = match best {
            None => Some((index, date)),
            Some((_, None)) if date.is_some() => Some((index, date)),
            Some((_, Some(current))) if date.is_some_and(|d| d < current) => Some((index, date)),
            keep => keep,
        };
    }
    best.map(|(index, _)| index)
}
