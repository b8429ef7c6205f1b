//! Bounded retry with exponential back-off for search API calls.
//!
//! [`with_backoff`] runs an operation up to `max_attempts` times. Only
//! transient failures ([`VoyageError::is_transient`]) are retried; the wait
//! between attempts comes from a jittered [`ExponentialBackoff`] policy,
//! clamped to `min_wait..=max_wait`.

use std::future::Future;
use std::time::{Duration, SystemTime};

use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::{Jitter, RetryDecision, RetryPolicy};
use tracing::{error, warn};

use crate::config::PlacesConfig;
use crate::{Result, VoyageError};

#[derive(Debug, Clone, PartialEq)]
pub struct RetrySettings {
    /// Total attempts including the first one
    pub max_attempts: u32,
    pub min_wait: Duration,
    pub max_wait: Duration,
}

impl RetrySettings {
    #[must_use]
    pub fn from_config(config: &PlacesConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            min_wait: Duration::from_millis(config.retry_min_wait_ms),
            max_wait: Duration::from_millis(config.retry_max_wait_ms.max(config.retry_min_wait_ms)),
        }
    }

    fn policy(&self) -> ExponentialBackoff {
        ExponentialBackoff::builder()
            .retry_bounds(self.min_wait, self.max_wait.max(self.min_wait))
            .jitter(Jitter::Bounded)
            .build_with_max_retries(self.max_attempts.saturating_sub(1))
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self::from_config(&PlacesConfig::default())
    }
}

/// Run `operation`, retrying transient failures with exponential back-off.
pub async fn with_backoff<T, F, Fut>(settings: &RetrySettings, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let policy = settings.policy();
    let started = SystemTime::now();
    let mut past_retries = 0u32;

    loop {
        let err: VoyageError = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_transient() => return Err(err),
            Err(err) => err,
        };

        match policy.should_retry(started, past_retries) {
            RetryDecision::Retry { execute_after } => {
                let wait = execute_after
                    .duration_since(SystemTime::now())
                    .unwrap_or_default()
                    .clamp(settings.min_wait, settings.max_wait.max(settings.min_wait));
                past_retries += 1;
                warn!(
                    attempt = past_retries,
                    max_attempts = settings.max_attempts,
                    wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "Transient places API error, retrying after back-off"
                );
                tokio::time::sleep(wait).await;
            }
            RetryDecision::DoNotRetry => {
                error!(
                    attempts = past_retries + 1,
                    error = %err,
                    "Places API request failed after all attempts"
                );
                return Err(err);
            }
        }
    }
}
