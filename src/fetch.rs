//! Blocking page fetcher
//!
//! One GET per call through a `ureq` agent. Status codes are classified here
//! instead of inside the agent, so a 404 and an unreachable host come back as
//! different error kinds.

use tracing::{debug, warn};
use url::Url;

use crate::error::{Result, ScrapeError};

/// Default User-Agent header sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("darth-scraper/", env!("CARGO_PKG_VERSION"));

/// Largest response body read before giving up, in bytes (100 MiB)
pub const DEFAULT_BODY_LIMIT: u64 = 100 * 1024 * 1024;

/// Source of HTML text for a URL
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetcher backed by a `ureq::Agent`
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
    body_limit: u64,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .user_agent(user_agent)
                .http_status_as_error(false)
                .build(),
        );
        Self::from_agent(agent)
    }

    /// Wrap a preconfigured agent.
    ///
    /// The agent must be built with `http_status_as_error(false)`, otherwise
    /// non-success statuses surface as `NetworkError`.
    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self {
            agent,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, limit: u64) -> Self {
        self.body_limit = limit;
        self
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetch started");

        let parsed = Url::parse(url).map_err(|source| ScrapeError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let response = self
            .agent
            .get(parsed.as_str())
            .call()
            .map_err(|e| network_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "non-success status");
            return Err(ScrapeError::FetchFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Decoded by the Content-Type charset (ureq "charset" feature)
        let body = response
            .into_body()
            .with_config()
            .limit(self.body_limit)
            .read_to_string()
            .map_err(|e| match e {
                ureq::Error::BodyExceedsLimit(limit) => {
                    warn!(url, limit, "response body over limit");
                    ScrapeError::BodyTooLarge {
                        url: url.to_string(),
                        limit,
                    }
                }
                other => network_error(url, other),
            })?;

        debug!(url, bytes = body.len(), "fetch finished");
        Ok(body)
    }
}

fn network_error(url: &str, source: ureq::Error) -> ScrapeError {
    warn!(url, error = %source, "transport failure");
    ScrapeError::NetworkError {
        url: url.to_string(),
        source: Box::new(source),
    }
}
