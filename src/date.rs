//! Best-effort publish date normalization.
//!
//! Raw dates come from `datetime` attributes, visible `<time>` text or
//! byline blocks, so they arrive in whatever shape the page used. Each one
//! is tried against a fixed list of patterns and rendered in RSS (RFC 2822)
//! form. Anything that does not parse becomes "now"; this module never
//! returns an error.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

/// `Tue, 05 Mar 2024 00:00:00 +0000`
pub const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

// ISO-ish patterns, tried in order. The first one that consumes the whole
// trimmed string wins.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%:z"];
const FRACTIONAL_OFFSET_FORMATS: [&str; 2] =
    ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%.f%:z"];
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

// Human-readable dates, all taken as UTC midnight.
const HUMAN_FORMATS: [&str; 5] = ["%b %d, %Y", "%B %d, %Y", "%d %b %Y", "%d %B %Y", "%Y/%m/%d"];

/// Format a timestamp the way `<pubDate>` and `<lastBuildDate>` expect.
pub fn format_pub_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format(PUB_DATE_FORMAT).to_string()
}

pub fn now_pub_date() -> String {
    format_pub_date(&Utc::now())
}

/// Normalize a raw date, falling back to the current UTC time.
pub fn normalize_pub_date(raw: Option<&str>) -> String {
    match raw.and_then(parse_raw_date) {
        Some(dt) => format_pub_date(&dt),
        None => {
            if let Some(r) = raw.filter(|r| !r.trim().is_empty()) {
                debug!(raw = r, "unrecognized date, using current time");
            }
            now_pub_date()
        }
    }
}

/// Parse a raw date string with the ISO patterns first, then the
/// human-readable ones. Offsets found in the input are kept.
pub fn parse_raw_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    parse_iso(s).or_else(|| parse_human(s))
}

fn parse_iso(s: &str) -> Option<DateTime<FixedOffset>> {
    // a trailing `Z` is an explicit UTC offset
    if let Some(stripped) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        let with_offset = format!("{stripped}+0000");
        if let Some(dt) = parse_with_offset(&with_offset) {
            return Some(dt);
        }
    }
    parse_with_offset(s)
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, NAIVE_TIMESTAMP_FORMAT)
                .ok()
                .map(as_utc)
        })
        .or_else(|| parse_date_only(s, DATE_ONLY_FORMAT))
}

fn parse_with_offset(s: &str) -> Option<DateTime<FixedOffset>> {
    OFFSET_FORMATS
        .iter()
        .chain(FRACTIONAL_OFFSET_FORMATS.iter())
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
}

fn parse_human(s: &str) -> Option<DateTime<FixedOffset>> {
    HUMAN_FORMATS.iter().find_map(|fmt| parse_date_only(s, fmt))
}

fn parse_date_only(s: &str, fmt: &str) -> Option<DateTime<FixedOffset>> {
    let date = NaiveDate::parse_from_str(s, fmt).ok()?;
    date.and_hms_opt(0, 0, 0).map(as_utc)
}

fn as_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&naive).fixed_offset()
}
