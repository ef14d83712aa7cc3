//! Turn the CSIS analysis listing page into an RSS 2.0 feed.
//!
//! The library is the pure part of the job: it takes already-fetched markup
//! and a [`FeedConfig`] and produces the feed document. Fetching the page and
//! writing the file are done by the `csis-rss` binary.
//!
//! ```text
//! markup -> select -> extract -> dedupe/limit -> normalize dates -> assemble
//! ```

pub mod config;
pub mod date;
pub mod dedupe;
pub mod error;
pub mod extract;
pub mod feed;
pub mod select;
pub mod text;

use scraper::Html;
use tracing::{debug, info};

pub use config::{ChannelMeta, FeedConfig};
pub use dedupe::dedupe_and_limit;
pub use error::{Error, Result};
pub use extract::{extract, ExtractedRecord, Extraction, SkipReason};
pub use feed::{assemble, NormalizedRecord};
pub use select::{select_candidates, ListingStrategy};

/// A finished feed and what went into it.
#[derive(Debug)]
pub struct RenderedFeed {
    pub document: Vec<u8>,
    pub item_count: usize,
    pub strategy: ListingStrategy,
}

/// Extract up to `max_items` unique records from a listing page.
///
/// Returns [`Error::NoItems`] when no selector strategy matches or when every
/// candidate was skipped.
pub fn collect_records(
    markup: &str,
    config: &FeedConfig,
) -> Result<(ListingStrategy, Vec<ExtractedRecord>)> {
    let document = Html::parse_document(markup);
    let (strategy, candidates) = select_candidates(&document).ok_or(Error::NoItems)?;
    info!(%strategy, candidates = candidates.len(), "selected candidate articles");

    let extracted = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            let extraction = extract(candidate, &config.base_url);
            if let Extraction::Skipped(reason) = &extraction {
                debug!(index, %reason, "skipping candidate");
            }
            extraction.into_record()
        });
    let records = dedupe_and_limit(extracted, config.max_items);
    if records.is_empty() {
        return Err(Error::NoItems);
    }
    Ok((strategy, records))
}

/// Run the whole pipeline over one page of markup.
pub fn render_feed(markup: &str, config: &FeedConfig) -> Result<RenderedFeed> {
    let (strategy, records) = collect_records(markup, config)?;
    let normalized: Vec<NormalizedRecord> = records.into_iter().map(NormalizedRecord::from).collect();
    let document = assemble(&config.channel, &normalized)?;
    info!(items = normalized.len(), bytes = document.len(), "assembled feed");
    Ok(RenderedFeed {
        document,
        item_count: normalized.len(),
        strategy,
    })
}
