use std::path::PathBuf;

use thiserror::Error;

/// Failures that end a run. Per-candidate skips and date fallbacks are not
/// errors and never show up here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetch failed for {url}: HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not read markup from {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no items found on the listing page")]
    NoItems,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to serialize feed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Fetch { .. } | Error::HttpStatus { .. } | Error::ReadInput { .. } => 2,
            Error::NoItems => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
