//! Pulling title, link, summary and a raw date out of one candidate block.
//!
//! Every field has its own fallback chain. A candidate that cannot produce a
//! link or a title is reported as [`Extraction::Skipped`] with the reason,
//! and the caller moves on to the next one.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use std::fmt;
use url::Url;

use crate::text::{element_text, inline_text};

static HEADING_ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h3 a").unwrap());
static ANY_ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static TITLE_LABEL: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());
static LISTING_SUMMARY: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".search-listing--summary").unwrap());
static TEASER: Lazy<Selector> = Lazy::new(|| Selector::parse(".teaser").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());
static DATE_LIKE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".contributors, .credit, .byline, .submitted, .date").unwrap()
});

/// One article as found on the page, before date normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub title: String,
    /// Always absolute.
    pub link: String,
    pub summary: String,
    pub raw_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoAnchor,
    MissingHref,
    UnresolvableHref(String),
    EmptyTitle,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoAnchor => f.write_str("no anchor"),
            SkipReason::MissingHref => f.write_str("anchor has no href"),
            SkipReason::UnresolvableHref(href) => write!(f, "cannot resolve href {href:?}"),
            SkipReason::EmptyTitle => f.write_str("empty title"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Record(ExtractedRecord),
    Skipped(SkipReason),
}

impl Extraction {
    pub fn into_record(self) -> Option<ExtractedRecord> {
        match self {
            Extraction::Record(rec) => Some(rec),
            Extraction::Skipped(_) => None,
        }
    }
}

pub fn extract(candidate: ElementRef<'_>, base: &Url) -> Extraction {
    let anchor = match candidate
        .select(&HEADING_ANCHOR)
        .next()
        .or_else(|| candidate.select(&ANY_ANCHOR).next())
    {
        Some(a) => a,
        None => return Extraction::Skipped(SkipReason::NoAnchor),
    };

    let href = match anchor.value().attr("href").map(str::trim) {
        Some(h) if !h.is_empty() => h,
        _ => return Extraction::Skipped(SkipReason::MissingHref),
    };
    let link = match base.join(href) {
        Ok(u) => u.to_string(),
        Err(_) => return Extraction::Skipped(SkipReason::UnresolvableHref(href.to_string())),
    };

    let title = anchor
        .select(&TITLE_LABEL)
        .next()
        .map(inline_text)
        .unwrap_or_else(|| inline_text(anchor));
    if title.is_empty() {
        return Extraction::Skipped(SkipReason::EmptyTitle);
    }

    Extraction::Record(ExtractedRecord {
        title,
        link,
        summary: summary_text(candidate),
        raw_date: raw_date(candidate),
    })
}

fn summary_text(candidate: ElementRef<'_>) -> String {
    [&*LISTING_SUMMARY, &*TEASER, &*PARAGRAPH]
        .into_iter()
        .find_map(|sel| candidate.select(sel).next())
        .map(element_text)
        .unwrap_or_default()
}

// time[datetime], else the time element's text. Byline-ish elements are
// only consulted when the block has no time element at all.
fn raw_date(candidate: ElementRef<'_>) -> Option<String> {
    let text = match candidate.select(&TIME).next() {
        Some(t) => t
            .value()
            .attr("datetime")
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| element_text(t)),
        None => candidate.select(&DATE_LIKE).next().map(element_text)?,
    };
    Some(text).filter(|d| !d.is_empty())
}
