//! Display formatting for content fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Placeholder shown for missing values.
pub const MISSING: &str = "—";

/// Parse an ISO date or RFC 3339 timestamp into a naive UTC datetime.
pub fn parse_iso(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a date for display ("Mar 05, 2025").
///
/// Missing values render as [`MISSING`]; unparseable values pass through.
pub fn format_date(value: Option<&str>) -> String {
    match value.filter(|v| !v.trim().is_empty()) {
        None => MISSING.to_string(),
        Some(raw) => match parse_iso(raw) {
            Some(dt) => dt.format("%b %d, %Y").to_string(),
            None => raw.to_string(),
        },
    }
}

/// Format a project status label.
///
/// Case, surrounding whitespace, and inner runs of spaces or hyphens are
/// ignored, so "In-Progress" and "in progress" both read "In Progress".
pub fn format_status(status: Option<&str>) -> &'static str {
    match normalize_status(status.unwrap_or("")).as_str() {
        "completed" => "Completed",
        "in_progress" => "In Progress",
        _ => MISSING,
    }
}

fn normalize_status(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_separator = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() || ch == '-' {
            if !in_separator {
                out.push('_');
                in_separator = true;
            }
        } else {
            out.extend(ch.to_lowercase());
            in_separator = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("2025-03-05")), "Mar 05, 2025");
        assert_eq!(format_date(Some("2024-11-30T18:22:01Z")), "Nov 30, 2024");
        assert_eq!(format_date(Some("last spring")), "last spring");
        assert_eq!(format_date(None), MISSING);
        assert_eq!(format_date(Some("  ")), MISSING);
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(Some("completed")), "Completed");
        assert_eq!(format_status(Some(" In-Progress ")), "In Progress");
        assert_eq!(format_status(Some("in   progress")), "In Progress");
        assert_eq!(format_status(Some("abandoned")), MISSING);
        assert_eq!(format_status(None), MISSING);
    }

    #[test]
    fn test_parse_iso_orders_dates() {
        let a = parse_iso("2024-01-01").unwrap();
        let b = parse_iso("2024-01-01T10:00:00+00:00").unwrap();
        assert!(a < b);
    }
}
