//! Reusable formatting utilities for CLI output
//!
//! Formatting for backend timestamps, percentages and relative ages used
//! across multiple commands.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Parse a backend timestamp.
///
/// The backend emits ISO 8601, sometimes without an offset; those are taken
/// as UTC.
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Format a backend timestamp as local date/time.
///
/// Unparseable input is returned as-is; empty input becomes "N/A".
///
/// # Example output
/// `05/01/2024 10:00`
pub fn format_timestamp_local(timestamp: &str) -> String {
    if timestamp.is_empty() {
        return "N/A".to_string();
    }
    match parse_timestamp(timestamp) {
        Some(dt) => dt.with_timezone(&Local).format("%m/%d/%Y %H:%M").to_string(),
        None => timestamp.to_string(),
    }
}

/// Format a percentage with one decimal, or "--" when absent.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => "--".to_string(),
    }
}

/// Format a plain measurement with one decimal, or "--" when absent.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "--".to_string(),
    }
}

/// Format elapsed time since `since` relative to `now`.
///
/// # Example output
/// - `just now`
/// - `45s ago`
/// - `3m ago`
pub fn format_age(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(since).num_seconds();
    if secs < 1 {
        "just now".to_string()
    } else if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}

/// Truncate string to max length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_parse_timestamp_with_and_without_offset() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T10:00:00.000000"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_format_timestamp_local() {
        let result = format_timestamp_local("2024-05-01T10:00:00Z");
        // Exact output depends on local TZ
        assert!(result.contains("/2024 "));
        assert_eq!(format_timestamp_local(""), "N/A");
        assert_eq!(format_timestamp_local("not-a-date"), "not-a-date");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(42.345)), "42.3%");
        assert_eq!(format_percent(None), "--");
    }

    #[test]
    fn test_format_age() {
        let now = Utc::now();
        assert_eq!(format_age(now, now), "just now");
        assert_eq!(format_age(now - Duration::seconds(45), now), "45s ago");
        assert_eq!(format_age(now - Duration::seconds(190), now), "3m ago");
        assert_eq!(format_age(now - Duration::hours(2), now), "2h ago");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a much longer reason", 10), "a much ...");
    }
}
