//! Timestamp minting and short relative-age labels.
//!
//! # Responsibility
//! - Produce sortable ISO-8601 UTC timestamps for note lifecycle fields.
//! - Render a compact human-readable age for list views.
//!
//! # Invariants
//! - Timestamps compare lexicographically in chronological order.
//! - The age ladder uses floor division only; each branch is exclusive and
//!   evaluated in order (month = 30 days, year = 365 days).

use chrono::{DateTime, SecondsFormat, Utc};

const JUST_NOW_LABEL: &str = "baru saja";

/// Returns the current instant as a sortable ISO-8601 UTC string with
/// millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Renders a short age label for `timestamp` relative to the current time.
pub fn relative_time_from_now(timestamp: &str) -> String {
    relative_time(timestamp, Utc::now())
}

/// Renders a short age label for `timestamp` relative to `now`.
///
/// Labels: `baru saja`, `{n}m` minutes, `{n}j` hours, `{n}h` days, `{n}w`
/// weeks, `{n}bln` months, `{n}th` years. Unparsable timestamps degrade to
/// the "just now" label rather than surfacing garbage.
pub fn relative_time(timestamp: &str, now: DateTime<Utc>) -> String {
    let parsed = match DateTime::parse_from_rfc3339(timestamp) {
        Ok(value) => value.with_timezone(&Utc),
        Err(_) => return JUST_NOW_LABEL.to_string(),
    };

    let sec = (now - parsed).num_seconds();
    if sec < 60 {
        return JUST_NOW_LABEL.to_string();
    }
    let min = sec / 60;
    if min < 60 {
        return format!("{min}m");
    }
    let hr = min / 60;
    if hr < 24 {
        return format!("{hr}j");
    }
    let day = hr / 24;
    if day < 7 {
        return format!("{day}h");
    }
    let week = day / 7;
    if week < 5 {
        return format!("{week}w");
    }
    let month = day / 30;
    if month < 12 {
        return format!("{month}bln");
    }
    let year = day / 365;
    format!("{year}th")
}
