use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use tracing::{debug, instrument};
use url::Url;

use csis_rss::config::FeedConfig;
use csis_rss::error::{Error, Result};

pub fn build_client(config: &FeedConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|source| Error::Fetch {
            url: config.start_url.to_string(),
            source,
        })
}

/// Fetch a page's text. Non-2xx responses are errors; nothing is retried.
#[instrument(level = "info", skip_all, fields(url = %url))]
pub fn fetch_markup(client: &Client, url: &Url, user_agent: &str) -> Result<String> {
    let fetch_err = |source: reqwest::Error| Error::Fetch {
        url: url.to_string(),
        source,
    };
    let resp = client
        .get(url.as_str())
        .header(USER_AGENT, user_agent)
        .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .send()
        .map_err(fetch_err)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let body = resp.text().map_err(fetch_err)?;
    debug!(bytes = body.len(), %status, "fetched page");
    Ok(body)
}
