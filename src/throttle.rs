//! Call budgets and retries for outbound requests.
//!
//! Each remote collaborator owns a [`Throttle`] (a `governor` token bucket)
//! and shares a [`RetryPolicy`]. Timeouts and 5xx answers are retried after a
//! fixed backoff; a quota-exceeded answer is handed straight back because the
//! interval budget is already spent.

use crate::config::RetryConfig;
use crate::error::Result;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::future::Future;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::{trace, warn};

/// Token bucket gating one external collaborator
pub struct Throttle {
    name: &'static str,
    limiter: DefaultDirectRateLimiter,
}

impl Throttle {
    /// Allow `calls` requests per second (at least one)
    pub fn per_second(name: &'static str, calls: u32) -> Self {
        let rate = NonZeroU32::new(calls).unwrap_or(NonZeroU32::MIN);
        Self {
            name,
            limiter: RateLimiter::direct(Quota::per_second(rate)),
        }
    }

    /// Block until the budget allows another call
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
        trace!(throttle = self.name, "Call permitted");
    }
}

/// Bounded retries with a fixed pause between attempts
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: config.backoff(),
        }
    }
}

impl RetryPolicy {
    /// No waiting between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Duration::ZERO,
        }
    }

    /// Run `op` until it succeeds, fails with a non-transient error, or the
    /// attempts run out. The last error is returned in the latter two cases.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    warn!(
                        what,
                        attempt,
                        max_attempts = self.max_attempts,
                        backoff_secs = self.backoff.as_secs(),
                        error = %e,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(self.backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
