//! Reusable formatting utilities for CLI output
//!
//! Slack reports times as Unix seconds; these helpers turn them into
//! something readable and render optional values consistently.

use chrono::{TimeZone, Utc};

/// Placeholder for values that are absent or unset
pub const MISSING: &str = "--";

/// Format Unix seconds as a local date/time string.
///
/// Returns "N/A" if the timestamp is zero or out of range.
///
/// # Example output
/// `01/15/2025 14:30`
pub fn format_timestamp_local(secs: i64) -> String {
    if secs <= 0 {
        return "N/A".to_string();
    }

    match Utc.timestamp_opt(secs, 0) {
        chrono::LocalResult::Single(dt) => dt
            .with_timezone(&chrono::Local)
            .format("%m/%d/%Y %H:%M")
            .to_string(),
        _ => "N/A".to_string(),
    }
}

/// Format Unix seconds as an ISO 8601 UTC string, or an empty string for zero.
pub fn format_iso(secs: i64) -> String {
    if secs <= 0 {
        return String::new();
    }
    match Utc.timestamp_opt(secs, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        _ => String::new(),
    }
}

/// Describe a status expiration: "never" for zero, otherwise the local time.
pub fn format_expiration(secs: i64) -> String {
    if secs == 0 {
        "never".to_string()
    } else {
        format_timestamp_local(secs)
    }
}

/// Show `value`, or the placeholder when it is blank.
pub fn or_missing(value: &str) -> String {
    if value.trim().is_empty() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}

/// Truncate to `max_len` characters with an ellipsis.
pub fn truncate(s: &str, max_len: usize) -> String {
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

    #[test]
    fn test_format_timestamp_local_valid() {
        // Jan 15, 2025 12:00:00 UTC; any local zone stays within a day
        let result = format_timestamp_local(1_736_942_400);
        assert!(result.starts_with("01/1"));
        assert!(result.contains("/2025"));
    }

    #[test]
    fn test_format_timestamp_local_zero() {
        assert_eq!(format_timestamp_local(0), "N/A");
        assert_eq!(format_timestamp_local(-5), "N/A");
    }

    #[test]
    fn test_format_iso() {
        assert_eq!(format_iso(1_736_942_400), "2025-01-15T12:00:00Z");
        assert_eq!(format_iso(0), "");
    }

    #[test]
    fn test_format_expiration_never() {
        assert_eq!(format_expiration(0), "never");
        assert_ne!(format_expiration(1_736_942_400), "never");
    }

    #[test]
    fn test_or_missing() {
        assert_eq!(or_missing(""), "--");
        assert_eq!(or_missing("  "), "--");
        assert_eq!(or_missing("ops"), "ops");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long channel purpose", 10), "a long ...");
    }
}
