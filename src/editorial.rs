//! DOI → editorial domain resolution.
//!
//! Follows the doi.org redirect chain and keeps the host of the final
//! landing page (`www.sciencedirect.com`, `link.springer.com`, ...). The
//! status of the last hop is ignored: publishers often answer bots with 403
//! but the location is still the one we want.

use crate::error::{ReviewError, Result};
use crate::source::DoiResolver;
use crate::throttle::{RetryPolicy, Throttle};
use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// DOI resolver base URL
const DOI_BASE_URL: &str = "https://doi.org/";

const USER_AGENT: &str = "Mozilla/5.0 (compatible; litreview/0.1)";

/// Maximum redirects followed per DOI
const MAX_REDIRECTS: usize = 15;

/// Resolves DOIs over HTTP with a call budget
pub struct HttpDoiResolver {
    client: Client,
    base_url: String,
    throttle: Throttle,
    retry: RetryPolicy,
}

impl HttpDoiResolver {
    /// Create a new HttpDoiResolver
    ///
    /// # Arguments
    ///
    /// * `calls_per_second` - call budget towards doi.org
    /// * `timeout` - connect and total timeout per attempt
    /// * `retry` - policy for transient failures
    pub fn new(calls_per_second: u32, timeout: Duration, retry: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| ReviewError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: DOI_BASE_URL.to_string(),
            throttle: Throttle::per_second("doi", calls_per_second),
            retry,
        })
    }

    /// Resolve against another DOI proxy (a mirror or a local stand-in)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    async fn follow(&self, doi: &str) -> Result<String> {
        self.throttle.wait().await;

        let url = format!("{}{}", self.base_url, doi.trim());
        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ReviewError::Timeout(format!("{}: {}", url, e))
            } else {
                ReviewError::Network(e)
            }
        })?;

        debug!(doi, status = response.status().as_u16(), final_url = %response.url(), "Followed DOI");
        editorial_host(response.url().as_str())
    }
}

#[async_trait]
impl DoiResolver for HttpDoiResolver {
    async fn resolve_final_location(&self, doi: &str) -> Result<String> {
        self.retry.run("doi redirect", || self.follow(doi)).await
    }
}

/// Host part of an effective URL
pub fn editorial_host(effective_url: &str) -> Result<String> {
    let url = Url::parse(effective_url)
        .map_err(|e| ReviewError::Parse(format!("Invalid URL {}: {}", effective_url, e)))?;
    url.host_str()
        .map(|h| h.to_ascii_lowercase())
        .ok_or_else(|| ReviewError::Parse(format!("URL without host: {}", effective_url)))
}
