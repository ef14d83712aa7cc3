//! Picking the candidate article blocks out of the listing page.
//!
//! The site's markup has changed across redesigns, so there is a short chain
//! of selectors from most to least specific. The first one that matches
//! anything wins and results are never merged across strategies.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::debug;

static SEARCH_LISTING: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.article-search-listing").unwrap());
static VIEWS_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse(".views-row article").unwrap());
static ANY_ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStrategy {
    /// `article.article-search-listing`
    SearchListing,
    /// `article` nested in a `.views-row` container
    ViewsRow,
    /// any `article` element
    AnyArticle,
}

impl ListingStrategy {
    /// Priority order, most specific first.
    pub const ORDER: [ListingStrategy; 3] = [
        ListingStrategy::SearchListing,
        ListingStrategy::ViewsRow,
        ListingStrategy::AnyArticle,
    ];

    fn selector(self) -> &'static Selector {
        match self {
            ListingStrategy::SearchListing => &*SEARCH_LISTING,
            ListingStrategy::ViewsRow => &*VIEWS_ROW,
            ListingStrategy::AnyArticle => &*ANY_ARTICLE,
        }
    }

    pub fn apply(self, document: &Html) -> Vec<ElementRef<'_>> {
        document.select(self.selector()).collect()
    }
}

impl fmt::Display for ListingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListingStrategy::SearchListing => "search-listing",
            ListingStrategy::ViewsRow => "views-row",
            ListingStrategy::AnyArticle => "any-article",
        };
        f.write_str(name)
    }
}

/// Candidate article blocks in document order, with the strategy that found
/// them. `None` when every strategy comes up empty.
pub fn select_candidates(document: &Html) -> Option<(ListingStrategy, Vec<ElementRef<'_>>)> {
    for strategy in ListingStrategy::ORDER {
        let found = strategy.apply(document);
        debug!(%strategy, count = found.len(), "tried listing selector");
        if !found.is_empty() {
            return Some((strategy, found));
        }
    }
    None
}
