//! Scraper settings from defaults, an optional file and the environment
//!
//! Precedence, lowest first: built-in defaults, the config file (format is
//! inferred from its extension), then `DARTH_SCRAPER__*` variables such as
//! `DARTH_SCRAPER__OUTPUT_DIR=out`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::export::{Quoting, DEFAULT_OUTPUT_DIR};
use crate::extractors::Filter;
use crate::fetch::{DEFAULT_BODY_LIMIT, DEFAULT_USER_AGENT};
use crate::preview::PREVIEW_LIMIT;

const ENV_PREFIX: &str = "DARTH_SCRAPER";

#[derive(Debug, thiserror::Error)]
#[error("failed to load configuration: {0}")]
pub struct ConfigError(#[from] config::ConfigError);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub user_agent: String,
    pub output_dir: PathBuf,
    pub preview_limit: usize,
    pub quoting: Quoting,
    pub default_filter: Filter,
    /// Response bodies larger than this fail with `BodyTooLarge`
    pub max_body_bytes: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            preview_limit: PREVIEW_LIMIT,
            quoting: Quoting::default(),
            default_filter: Filter::default(),
            max_body_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Builder over the `config` crate sources
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Read settings from a file that must exist.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Read settings from a file if it is present.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Use another environment prefix, mostly for tests.
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    pub fn load(self) -> Result<ScraperConfig, ConfigError> {
        let config = self
            .builder
            .add_source(Environment::with_prefix(&self.env_prefix).separator("__"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
