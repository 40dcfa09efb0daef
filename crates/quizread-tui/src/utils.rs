//! Small formatting helpers for the UI.

use std::time::Duration;

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if date.len() >= 10 {
        // YYYY-MM-DD prefix
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}

/// Render a countdown as m:ss
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2025-11-02T10:15:00Z"), "Nov 02, 2025");
        assert_eq!(format_date("2025-11-02"), "2025-11-02");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(Duration::from_secs(0)), "0:00");
        assert_eq!(format_countdown(Duration::from_secs(65)), "1:05");
        assert_eq!(format_countdown(Duration::from_secs(25 * 60)), "25:00");
    }
}
