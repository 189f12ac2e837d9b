//! Date/time utilities for postboard.
//!
//! Timestamps are stored as UTC text (`YYYY-MM-DD HH:MM:SS`) so the same
//! column layout works on every backend.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Storage format for `created_at` / `updated_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current UTC time in storage format.
pub fn now_timestamp() -> String {
    format_timestamp(&Utc::now())
}

/// Format a UTC datetime in storage format.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp back into a UTC datetime.
///
/// Accepts the storage format and RFC3339. Returns `None` for anything else.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_timestamp(&dt), "2024-01-15 10:30:00");
    }

    #[test]
    fn test_parse_storage_format() {
        let dt = parse_timestamp("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_timestamp("2024-01-15T19:30:00+09:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_now_round_trips() {
        let now = now_timestamp();
        assert!(parse_timestamp(&now).is_some());
    }
}
