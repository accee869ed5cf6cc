//! Run configuration loaded from `litreview.toml`.
//!
//! The file carries the three search-term groups, the Scopus date range, the
//! database location and the throttling knobs. The API key is never read
//! from the file; the binary takes it from `--api-key` / `ELSEVIER_API_KEY`.

use crate::error::{ReviewError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "litreview.toml";

/// Default SQLite database file
pub const DEFAULT_DATABASE: &str = "documents.db";

/// Default Scopus API base URL
pub const DEFAULT_SCOPUS_BASE_URL: &str = "https://api.elsevier.com/content";

/// Number of term groups combined into each search query
pub const TERM_GROUPS: usize = 3;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Three groups of search terms; queries are their Cartesian product
    pub search_terms: Vec<Vec<String>>,

    /// Scopus `date` parameter, e.g. "2018-2022"
    #[serde(default = "default_date_range")]
    pub date_range: String,

    /// SQLite database file
    #[serde(default = "default_database")]
    pub database: PathBuf,

    #[serde(default)]
    pub scopus: ScopusConfig,

    #[serde(default)]
    pub retry: RetryConfig,
}

/// Scopus client settings
#[derive(Debug, Clone, Deserialize)]
pub struct ScopusConfig {
    #[serde(default = "default_scopus_base_url")]
    pub base_url: String,

    /// Budget for search page requests
    #[serde(default = "default_search_rate")]
    pub search_calls_per_second: u32,

    /// Budget for abstract / serial-title / DOI lookups
    #[serde(default = "default_lookup_rate")]
    pub lookup_calls_per_second: u32,

    /// Per-attempt HTTP timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Retry policy for transient failures
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
}

fn default_date_range() -> String {
    "2018-2022".to_string()
}

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

fn default_scopus_base_url() -> String {
    DEFAULT_SCOPUS_BASE_URL.to_string()
}

fn default_search_rate() -> u32 {
    1
}

fn default_lookup_rate() -> u32 {
    2
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    10
}

fn default_backoff_secs() -> u64 {
    60
}

impl Default for ScopusConfig {
    fn default() -> Self {
        Self {
            base_url: default_scopus_base_url(),
            search_calls_per_second: default_search_rate(),
            lookup_calls_per_second: default_lookup_rate(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_secs: default_backoff_secs(),
        }
    }
}

impl ScopusConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RetryConfig {
    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }
}

impl Config {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReviewError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ReviewError::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check structural constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.search_terms.len() != TERM_GROUPS {
            return Err(ReviewError::Config(format!(
                "search_terms must contain exactly {} groups, found {}",
                TERM_GROUPS,
                self.search_terms.len()
            )));
        }
        if let Some(idx) = self.search_terms.iter().position(|g| g.is_empty()) {
            return Err(ReviewError::Config(format!("search_terms group {} is empty", idx)));
        }
        if self.scopus.search_calls_per_second == 0 || self.scopus.lookup_calls_per_second == 0 {
            return Err(ReviewError::Config("call rates must be greater than zero".into()));
        }
        if self.retry.max_attempts == 0 {
            return Err(ReviewError::Config("retry.max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}
