//! Lenient publish-date parsing.
//!
//! Sheet cells come either as RFC 2822 style strings copied out of RSS feeds
//! (`Tue, 03 Jun 2025 14:30:00 +0900`) or as ISO-8601. Each format is a
//! strategy in [`STRATEGIES`], tried in order; the first hit wins and a total
//! miss yields `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::trace;

type Strategy = fn(&str) -> Option<NaiveDateTime>;

const STRATEGIES: &[Strategy] = &[parse_rss_style, parse_iso8601];

const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Parse a publish-date cell into a naive timestamp.
///
/// Anything from the first `" +"` onward (an RFC 2822 offset) is discarded
/// first, so `"… 14:30:00 +0900"` and `"… 14:30:00"` parse to the same value.
pub fn parse_published_at(raw: &str) -> Option<NaiveDateTime> {
    let mut value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if let Some(idx) = value.find(" +") {
        value = &value[..idx];
    }

    let parsed = STRATEGIES.iter().find_map(|strategy| strategy(value));
    if parsed.is_none() {
        trace!(value, "Unparseable publish date");
    }
    parsed
}

/// `<Abbrev-weekday>, <day> <Abbrev-month> <year> <H>:<M>:<S>`.
///
/// The weekday must be a real abbreviation but is not checked against the
/// date; feeds routinely get it wrong.
fn parse_rss_style(value: &str) -> Option<NaiveDateTime> {
    let (weekday, rest) = value.split_once(", ")?;
    if !WEEKDAYS.contains(&weekday.to_ascii_lowercase().as_str()) {
        return None;
    }
    NaiveDateTime::parse_from_str(rest.trim(), "%d %b %Y %H:%M:%S").ok()
}

/// ISO-8601 with a trailing `Z` read as `+00:00`.
///
/// An explicit offset is dropped and the wall-clock time kept, so
/// `23:30:00+09:00` reads as 23:30 just like the RSS style strings.
fn parse_iso8601(value: &str) -> Option<NaiveDateTime> {
    let value = value.replace('Z', "+00:00");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&value) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(&value, fmt) {
            return Some(dt.naive_local());
        }
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
