//! Run configuration.
//!
//! Everything the pipeline needs to know about the site and the output lives
//! in one [`FeedConfig`] value that is passed in explicitly. The defaults
//! reproduce the scheduled CSIS job.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "https://www.csis.org";
pub const DEFAULT_START_URL: &str = "https://www.csis.org/analysis";
pub const DEFAULT_OUTPUT: &str = "rss.xml";
pub const DEFAULT_MAX_ITEMS: usize = 40;
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_TTL_MINUTES: u32 = 60;
pub const DEFAULT_USER_AGENT: &str = "rss-generator-bot/1.0";
pub const DEFAULT_CHANNEL_TITLE: &str = "CSIS — Analysis (custom RSS)";
pub const DEFAULT_CHANNEL_DESCRIPTION: &str = "Auto-generated RSS feed for CSIS Analysis pages.";

/// Output destination that means "write to standard output".
pub const STDOUT_DEST: &str = "-";

/// Channel-level metadata written at the top of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMeta {
    pub title: String,
    pub link: String,
    pub description: String,
    /// Minutes a reader may cache the feed.
    pub ttl_minutes: u32,
}

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub start_url: Url,
    /// Relative hrefs found on the page are resolved against this.
    pub base_url: Url,
    pub output: PathBuf,
    pub max_items: usize,
    pub timeout: Duration,
    pub user_agent: String,
    pub channel: ChannelMeta,
}

impl FeedConfig {
    /// Build a config for `start_url`, resolving links against `base_url`.
    /// The channel link follows the start URL.
    pub fn new(start_url: &str, base_url: &str) -> Result<Self> {
        let start_url = Url::parse(start_url)?;
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            channel: ChannelMeta {
                title: DEFAULT_CHANNEL_TITLE.to_string(),
                link: start_url.as_str().to_string(),
                description: DEFAULT_CHANNEL_DESCRIPTION.to_string(),
                ttl_minutes: DEFAULT_TTL_MINUTES,
            },
            start_url,
            base_url,
            output: PathBuf::from(DEFAULT_OUTPUT),
            max_items: DEFAULT_MAX_ITEMS,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == STDOUT_DEST
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        // both constants are well-formed absolute URLs
        Self::new(DEFAULT_START_URL, DEFAULT_BASE_URL).expect("default URLs parse")
    }
}
