//! Timestamps and record ids.
//!
//! Timestamps are ISO-8601 UTC strings with millisecond precision
//! (`2024-07-15T18:00:00.000Z`). Ids are decimal millisecond counters,
//! strictly increasing within the process.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Current time truncated to whole milliseconds.
pub fn now() -> DateTime<Utc> {
    let current = Utc::now();
    DateTime::from_timestamp_millis(current.timestamp_millis()).unwrap_or(current)
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn timestamp_now() -> String {
    format_timestamp(now())
}

/// Parse an ISO-8601 date or date-time.
///
/// Accepts RFC 3339, naive date-times (taken as UTC) and plain dates
/// (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Some(at.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A timestamp for "now" that sorts strictly after every parseable `earlier`.
///
/// Clocks can stand still (or step back) between two calls; when that happens
/// the result is the latest earlier stamp plus one millisecond.
pub fn timestamp_after(earlier: &[&str]) -> String {
    let mut stamp = now();
    for previous in earlier.iter().filter_map(|s| parse_timestamp(s)) {
        if stamp <= previous {
            stamp = previous + Duration::milliseconds(1);
        }
    }
    format_timestamp(stamp)
}

/// Generate a fresh id for which `taken` returns false.
pub fn next_id<F>(taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let now = Utc::now().timestamp_millis();
    loop {
        let id = claim_id(now).to_string();
        if !taken(&id) {
            return id;
        }
    }
}

fn claim_id(now: i64) -> i64 {
    let mut current = LAST_ID.load(Ordering::Relaxed);
    loop {
        let next = now.max(current + 1);
        match LAST_ID.compare_exchange_weak(current, next, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => current = actual,
        }
    }
}
