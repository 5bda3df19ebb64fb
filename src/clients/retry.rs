//! Rate-limit retry policy.
//!
//! The policy is fixed: at most [`MAX_TRIES`] attempts, waiting
//! `2^attempt * BACKOFF_UNIT` after each rate-limited attempt except the last.

use std::time::Duration;

/// Total number of attempts for one request, the first one included.
pub const MAX_TRIES: u32 = 5;

/// Base unit of the exponential backoff.
pub const BACKOFF_UNIT: Duration = Duration::from_millis(1000);

/// Returns the wait before retrying after rate-limited attempt `attempt`
/// (zero-based): 1s, 2s, 4s, 8s, ...
#[must_use]
pub fn backoff_delay(attempt: u32) -> Duration {
    BACKOFF_UNIT.saturating_mul(2u32.saturating_pow(attempt))
}

/// Where the retry loop stands.
///
/// A successful or non-retryable response leaves the loop directly, so only
/// the two rate-limit states need representing.
#[derive(Debug)]
pub(crate) enum RetryState<R> {
    /// About to send attempt `n` (zero-based).
    Attempting(u32),
    /// The final attempt was rate limited; carries its response.
    RateLimitExhausted(R),
}

impl<R> RetryState<R> {
    /// Transition after attempt `attempt` came back rate limited.
    pub(crate) fn after_rate_limit(attempt: u32, response: R) -> Self {
        if attempt + 1 >= MAX_TRIES {
            Self::RateLimitExhausted(response)
        } else {
            Self::Attempting(attempt + 1)
        }
    }
}
