//! Clock and timestamp utilities.
//!
//! All timestamps are `i64` milliseconds since the Unix epoch. The same
//! clock feeds request signing and default history-window bounds, so both
//! stay consistent with each other.

use chrono::{DateTime, NaiveDate, Utc};

/// Current time in milliseconds since the Unix epoch.
#[inline]
pub fn milliseconds() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current time in seconds since the Unix epoch.
#[inline]
pub fn seconds() -> i64 {
    Utc::now().timestamp()
}

/// Render a millisecond timestamp as ISO 8601 UTC
/// (`"2024-01-01T12:00:00.000Z"`). `None` for out-of-range values.
pub fn iso8601(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp_millis(timestamp)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}

/// Parse an ISO 8601 UTC datetime back to milliseconds.
pub fn parse_iso8601(datetime: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(datetime)
        .map(|dt| dt.timestamp_millis())
        .ok()
}

/// Parse a `YYMMDD` expiry token (as used in dated-future identifiers) to a
/// midnight-UTC millisecond timestamp.
pub fn parse_yymmdd(token: &str) -> Option<i64> {
    if token.len() != 6 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = 2000 + token[0..2].parse::<i32>().ok()?;
    let month = token[2..4].parse::<u32>().ok()?;
    let day = token[4..6].parse::<u32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(
        date.and_hms_opt(0, 0, 0)?
            .and_utc()
            .timestamp_millis(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milliseconds_monotonic_enough() {
        let a = milliseconds();
        let b = milliseconds();
        assert!(b >= a);
        assert!(a > 1_600_000_000_000);
    }

    #[test]
    fn test_iso8601_round_trip() {
        let ts = 1704110400000;
        let rendered = iso8601(ts).unwrap();
        assert_eq!(rendered, "2024-01-01T12:00:00.000Z");
        assert_eq!(parse_iso8601(&rendered), Some(ts));
    }

    #[test]
    fn test_parse_yymmdd() {
        let ts = parse_yymmdd("240628").unwrap();
        assert_eq!(iso8601(ts).unwrap(), "2024-06-28T00:00:00.000Z");
        assert_eq!(parse_yymmdd("2406"), None);
        assert_eq!(parse_yymmdd("24June"), None);
        assert_eq!(parse_yymmdd("241350"), None);
    }
}
