//! Date normalization for pages and the feed.
//!
//! Source documents carry `YYYY-MM-DD` dates. Pages show a long display
//! form, the feed needs RFC 2822 at UTC midnight. Nothing here returns an
//! error: an unparsable date falls back instead.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::cmp::Ordering;

/// `strftime` format for RFC 2822 timestamps in GMT.
const RFC2822_GMT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A frontmatter date: the raw string plus its parsed value, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocDate {
    raw: String,
    parsed: Option<NaiveDate>,
}

impl DocDate {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = parse_ymd(&raw);
        Self { raw, parsed }
    }

    /// The date exactly as written in the frontmatter.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub const fn parsed(&self) -> Option<NaiveDate> {
        self.parsed
    }

    /// Long display form ("March 1, 2024"), or the raw string if unparsable.
    pub fn display(&self) -> String {
        match self.parsed {
            Some(date) => date.format("%B %-d, %Y").to_string(),
            None => self.raw.clone(),
        }
    }

    /// RFC 2822 at UTC midnight, or the current UTC time if unparsable.
    pub fn rfc2822(&self) -> String {
        match self.parsed {
            Some(date) => to_rfc2822(date),
            None => now_rfc2822(),
        }
    }

    /// Ordering used by the feed: unparsable dates sort as the earliest.
    pub fn cmp_chronological(&self, other: &Self) -> Ordering {
        // `None < Some(_)` for `Option`
        self.parsed.cmp(&other.parsed)
    }
}

/// Parse `YYYY-MM-DD`. Anything else (including trailing text) is `None`.
pub fn parse_ymd(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Format a calendar date as RFC 2822 at midnight UTC.
pub fn to_rfc2822(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format(RFC2822_GMT)
        .to_string()
}

/// Current UTC time in RFC 2822.
pub fn now_rfc2822() -> String {
    format_utc(Utc::now())
}

fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format(RFC2822_GMT).to_string()
}
