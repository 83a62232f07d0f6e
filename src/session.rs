//! One fetch-filter-preview/export cycle per call

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::ScraperConfig;
use crate::error::{Field, Result, ScrapeError};
use crate::export::Exporter;
use crate::extractors::Filter;
use crate::fetch::{Fetch, HttpFetcher};
use crate::preview::truncate_chars;

/// Validates user input, fetches the page and hands the projection to the
/// preview or the exporter. Holds no state between calls.
pub struct Session<F = HttpFetcher> {
    fetcher: F,
    exporter: Exporter,
    preview_limit: usize,
}

impl Session<HttpFetcher> {
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(
            HttpFetcher::new(&config.user_agent)
                .with_body_limit(config.max_body_bytes),
            Exporter::new(&config.output_dir, config.quoting),
            config.preview_limit,
        )
    }
}

impl<F: Fetch> Session<F> {
    pub fn new(fetcher: F, exporter: Exporter, preview_limit: usize) -> Self {
        Self {
            fetcher,
            exporter,
            preview_limit,
        }
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }

    /// Filtered page content, cut to the preview limit
    pub fn preview(&self, url: &str, filter: Filter) -> Result<String> {
        debug!(url, %filter, "preview started");
        require(url, Field::Url)?;

        let html = self.fetcher.fetch(url)?;
        let projected = filter.apply(&html);
        Ok(truncate_chars(&projected, self.preview_limit).to_string())
    }

    /// Filtered page content written to `<output_dir>/<filename>.csv`
    pub fn export(&self, url: &str, filter: Filter, filename: &str) -> Result<PathBuf> {
        debug!(url, %filter, filename, "export started");
        require(url, Field::Url)?;
        require(filename, Field::Filename)?;

        let html = self.fetcher.fetch(url)?;
        let path = if filter.is_attribute_projection() {
            self.exporter.export_rows(filename, &filter.rows(&html))?
        } else {
            self.exporter.export_text(filename, &filter.apply(&html))?
        };

        info!(url, %filter, path = %path.display(), "exported");
        Ok(path)
    }
}

fn require(value: &str, field: Field) -> Result<()> {
    if value.is_empty() {
        return Err(ScrapeError::EmptyInput(field));
    }
    Ok(())
}
