//! `YYYY-MM` periods.
//!
//! Parsing is only used for ordering and diagnostics. What gets printed is always
//! the verbatim string from the record, so a malformed date still renders.

use chrono::{Datelike, NaiveDate};

/// A parsed `YYYY-MM` month. Orders by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Parses `YYYY-MM`. Anything else (including `YYYY-MM-DD`) is `None`.
    pub fn parse(s: &str) -> Option<Period> {
        let s = s.trim();
        if s.len() != 7 {
            return None;
        }
        let date = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()?;
        Some(Period {
            year: date.year(),
            month: date.month(),
        })
    }
}

/// Formats the right-aligned period string of an entry header.
///
/// - `start` + `end` → `"start – end"`
/// - `start` only → `"start"`, or `"start – <label>"` when an ongoing label is configured
/// - no `start` → `end` alone (possibly empty)
pub fn format_period_range(start: &str, end: &str, ongoing_label: Option<&str>) -> String {
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} – {end}"),
        (false, true) => match ongoing_label {
            Some(label) if !label.is_empty() => format!("{start} – {label}"),
            _ => start.to_string(),
        },
        (true, _) => end.to_string(),
    }
}

/// True when both ends parse and the end month precedes the start month.
pub fn is_inverted(start: &str, end: &str) -> bool {
    match (Period::parse(start), Period::parse(end)) {
        (Some(s), Some(e)) => e < s,
        _ => false,
    }
}
