use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use csis_rss::config::{self, FeedConfig};
use fetch::{build_client, fetch_markup};
use csis_rss::{render_feed, Error, Result};
use tracing::{error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod fetch;

/// csis-rss - scrape the CSIS analysis listing into an RSS 2.0 feed
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listing page to scrape
    #[arg(short, long, env = "CSIS_RSS_URL", default_value = config::DEFAULT_START_URL)]
    url: String,

    /// Base URL relative article links are resolved against
    #[arg(long, env = "CSIS_RSS_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Where to write the feed (`-` for stdout); the file is replaced on every run
    #[arg(short, long, env = "CSIS_RSS_OUTPUT", default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Maximum number of items in the feed
    #[arg(
        short = 'n',
        long = "max-items",
        env = "CSIS_RSS_MAX_ITEMS",
        default_value_t = config::DEFAULT_MAX_ITEMS,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    max_items: usize,

    /// Timeout in milliseconds for the page fetch
    #[arg(short = 't', long = "timeout-ms", env = "CSIS_RSS_TIMEOUT_MS", default_value_t = config::DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Minutes readers may cache the feed (<ttl>)
    #[arg(long, env = "CSIS_RSS_TTL", default_value_t = config::DEFAULT_TTL_MINUTES)]
    ttl: u32,

    /// Channel title
    #[arg(long, env = "CSIS_RSS_TITLE", default_value = config::DEFAULT_CHANNEL_TITLE)]
    title: String,

    /// Channel description
    #[arg(long, env = "CSIS_RSS_DESCRIPTION", default_value = config::DEFAULT_CHANNEL_DESCRIPTION)]
    description: String,

    /// Read the listing markup from a file instead of fetching it
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<FeedConfig> {
        let mut cfg = FeedConfig::new(&self.url, &self.base_url)?
            .with_output(self.output)
            .with_max_items(self.max_items);
        cfg.timeout = Duration::from_millis(self.timeout_ms);
        cfg.channel.title = self.title;
        cfg.channel.description = self.description;
        cfg.channel.ttl_minutes = self.ttl;
        Ok(cfg)
    }
}

fn main() {
    init_tracing();
    let mut args = Args::parse();
    let html = args.html.take();

    let result = args.into_config().and_then(|cfg| run(&cfg, html));
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            error!(error = %e, "run failed");
            match &e {
                Error::Fetch { .. } | Error::HttpStatus { .. } | Error::ReadInput { .. } => {
                    eprintln!("ERROR fetching: {}", e)
                }
                Error::NoItems => eprintln!("No items found. Exiting."),
                _ => eprintln!("error: {}", e),
            }
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cfg: &FeedConfig, html: Option<PathBuf>) -> Result<()> {
    let markup = match html {
        Some(path) => fs::read_to_string(&path).map_err(|source| Error::ReadInput { path, source })?,
        None => {
            let client = build_client(cfg)?;
            fetch_markup(&client, &cfg.start_url, &cfg.user_agent)?
        }
    };

    let feed = render_feed(&markup, cfg)?;
    info!(strategy = %feed.strategy, items = feed.item_count, "feed ready");

    if cfg.writes_to_stdout() {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&feed.document)?;
        stdout.flush()?;
        eprintln!("Wrote feed to stdout with {} items", feed.item_count);
    } else {
        fs::write(&cfg.output, &feed.document)?;
        println!("Wrote {} with {} items", cfg.output.display(), feed.item_count);
    }
    Ok(())
}
