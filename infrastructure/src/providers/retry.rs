//! Retry loop shared by the provider backends.
//!
//! The reference behavior is a fixed delay between attempts. Exponential
//! backoff with deterministic jitter can be enabled per provider.

use medibot_application::ProviderError;
use medibot_domain::{BackoffStrategy, ProviderConfig};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// How many times to try and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first; never below 1
    pub max_attempts: u32,
    pub delay: Duration,
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            backoff: BackoffStrategy::Fixed,
        }
    }

    /// Single attempt, no waiting
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay).with_backoff(config.backoff)
    }

    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Delay to wait after the failed attempt with zero-based index `attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self.backoff {
            BackoffStrategy::Fixed => self.delay,
            BackoffStrategy::Exponential { max_delay } => {
                let base = self.delay.as_millis() as u64;
                let mut delay = base.saturating_mul(1u64 << attempt.min(16));
                delay = delay.min(max_delay.as_millis() as u64);
                let span = (delay / 2).max(1);
                let jitter = (u64::from(attempt)
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1))
                    % span;
                Duration::from_millis(delay.saturating_sub(jitter))
            }
        }
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or
    /// attempts run out. `op` receives the one-based attempt number.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, ProviderError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match op(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("{} succeeded on attempt {}", label, attempt);
                    }
                    return Ok(value);
                }
                Err(e) if !e.is_retryable() || attempt >= self.max_attempts => {
                    warn!(
                        "{} attempt {}/{} failed: {}",
                        label, attempt, self.max_attempts, e
                    );
                    return Err(e);
                }
                Err(e) => {
                    let delay = self.delay_for(attempt - 1);
                    debug!(
                        "{} attempt {}/{} failed: {}; retrying in {:?}",
                        label, attempt, self.max_attempts, e, delay
                    );
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}
