//! Error kinds for fetching, extracting and exporting

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Input field checked before a scrape starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    Filename,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Url => f.write_str("URL"),
            Field::Filename => f.write_str("filename"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{0} is empty")]
    EmptyInput(Field),

    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP {status} for {url}")]
    FetchFailed { url: String, status: u16 },

    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("response from {url} is larger than {limit} bytes")]
    BodyTooLarge { url: String, limit: u64 },

    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    /// Short message shown to the person driving the scraper.
    ///
    /// Every fetch problem except an oversized body reads as "Invalid URL";
    /// the variant itself keeps the distinction for logs and tests.
    pub fn user_message(&self) -> &'static str {
        match self {
            ScrapeError::EmptyInput(Field::Url) => "Enter a URL!",
            ScrapeError::EmptyInput(Field::Filename) => "Enter a filename!",
            ScrapeError::InvalidUrl { .. }
            | ScrapeError::FetchFailed { .. }
            | ScrapeError::NetworkError { .. } => "Invalid URL",
            ScrapeError::BodyTooLarge { .. } => "Page too large",
            ScrapeError::WriteFailed { .. } => "Error writing to file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
