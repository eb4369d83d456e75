//! Rate-limit retry with exponential backoff
//!
//! Search calls are retried only when the provider answers with
//! 429 Too Many Requests. Every other failure is returned immediately and
//! the caller recovers it into an empty result.
//!
//! ## Exponential Backoff
//!
//! With the defaults:
//! - Attempt 1: immediate
//! - Retry 1: 2000ms delay
//! - Retry 2: 4000ms delay (2x)
//! - Capped at max_backoff_ms
//!
//! ## Configuration Example
//!
//! ```yaml
//! search:
//!   retry:
//!     max_retries: 2
//!     initial_backoff_ms: 2000
//!     max_backoff_ms: 4000
//! ```

use crate::constants::{DEFAULT_INITIAL_BACKOFF_MS, DEFAULT_MAX_BACKOFF_MS, DEFAULT_MAX_RETRIES};
use std::time::Duration;
use tracing::warn;

/// HTTP status that triggers a retry
pub const TOO_MANY_REQUESTS: u16 = 429;

/// Errors that can tell whether they were caused by rate limiting
pub trait RateLimited {
    fn is_rate_limited(&self) -> bool;
}

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds
    pub initial_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds (cap for exponential growth)
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF_MS,
            max_backoff_ms: DEFAULT_MAX_BACKOFF_MS,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff_ms,
            max_backoff_ms,
        }
    }

    /// Check if an HTTP status code should be retried
    pub fn is_retriable_status(&self, status_code: u16) -> bool {
        status_code == TOO_MANY_REQUESTS
    }

    /// Delay before attempt number `attempt` (0 = first attempt, no delay)
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_millis(0);
        }

        // initial_backoff * 2^(attempt-1)
        let backoff_ms = self
            .initial_backoff_ms
            .saturating_mul(2u64.saturating_pow(attempt - 1))
            .min(self.max_backoff_ms);

        Duration::from_millis(backoff_ms)
    }

    /// Whether attempt `attempt` (0-indexed) may be followed by another
    pub fn should_retry(&self, attempt: u32, status_code: u16) -> bool {
        attempt < self.max_retries && self.is_retriable_status(status_code)
    }
}

/// Run `op`, retrying rate-limited failures according to `policy`.
///
/// `sleep` is called with each backoff delay; production code passes
/// `std::thread::sleep`, tests pass a recorder.
pub fn with_rate_limit_retry<T, E, S, F>(policy: &RetryPolicy, mut sleep: S, mut op: F) -> Result<T, E>
where
    E: RateLimited + std::fmt::Display,
    S: FnMut(Duration),
    F: FnMut() -> Result<T, E>,
{
    let mut attempt = 0u32;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if err.is_rate_limited() && policy.should_retry(attempt, TOO_MANY_REQUESTS) => {
                attempt += 1;
                let delay = policy.backoff_duration(attempt);
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Rate limited, backing off"
                );
                sleep(delay);
            }
            Err(err) => return Err(err),
        }
    }
}
