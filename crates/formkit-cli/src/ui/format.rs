//! String formatting utilities for UI rendering.

use chrono::{DateTime, Utc};

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// First 8 characters of an id.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Format a datetime for display.
pub fn format_datetime(dt: &DateTime<Utc>, pretty: bool) -> String {
    if pretty {
        dt.format("%Y-%m-%d %H:%M UTC").to_string()
    } else {
        dt.to_rfc3339()
    }
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("7a2e3c0b-1234-5678-9abc-def012345678"), "7a2e3c0b");
        assert_eq!(short_id("1700"), "1700");
    }

    #[test]
    fn test_format_datetime() {
        let dt = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        assert_eq!(format_datetime(&dt, true), "2026-10-18 09:30 UTC");
        assert_eq!(format_datetime(&dt, false), "2026-10-18T09:30:00+00:00");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("hello\nworld"), "hello world");
        assert_eq!(single_line("no newlines"), "no newlines");
    }
}
