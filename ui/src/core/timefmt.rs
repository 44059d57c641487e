//! Timestamp parsing and the label formats the pipeline aligns on.
//!
//! The parsing server emits ISO-8601 timestamps that are usually naive
//! (no offset); naive values are taken as UTC. Labels come in two
//! granularities: a minute label that keys chart rows, and a date+time
//! label used by the hourly tables and the report's period lines.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Parse an ISO-8601 timestamp; RFC3339 first, then the naive shapes the
/// server and the `datetime-local` inputs produce. Returns `None` on
/// anything unreadable rather than guessing.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }

    let naive_formats = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ];
    for format in naive_formats {
        if let Ok(ts) = PrimitiveDateTime::parse(raw, format) {
            return Some(ts.assume_utc());
        }
    }

    None
}

/// Minute-precision label, the chart row alignment key.
pub fn minute_label(ts: OffsetDateTime) -> String {
    ts.format(&format_description!("[hour]:[minute]"))
        .unwrap_or_else(|_| "—".to_string())
}

/// Date+time label used for table rows and report period lines.
pub fn day_time_label(ts: OffsetDateTime) -> String {
    ts.format(&format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_else(|_| "—".to_string())
}
