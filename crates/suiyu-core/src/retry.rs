//! Retry strategies for the gap-fill download.

use std::time::Duration;

use tracing::debug;

use crate::config::fetch as fetch_config;

/// How many times to try an operation and how long to wait in between.
pub trait RetryStrategy {
    fn max_attempts(&self) -> u32;

    /// Delay after the given failed attempt (0-indexed).
    fn delay_for_attempt(&self, attempt: u32) -> Option<Duration>;

    /// Call `f` up to `max_attempts()` times, sleeping `delay_for_attempt()`
    /// after each failure except the last.
    fn execute<T, E, F>(&self, mut f: F) -> Result<T, E>
    where
        E: std::fmt::Display,
        F: FnMut(u32) -> Result<T, E>,
    {
        let max = self.max_attempts().max(1);
        let mut attempt = 0;

        loop {
            match f(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if attempt + 1 >= max => return Err(e),
                Err(e) => {
                    debug!("Attempt {} of {} failed: {}", attempt + 1, max, e);
                    if let Some(delay) = self.delay_for_attempt(attempt) {
                        std::thread::sleep(delay);
                    }
                }
            }
            attempt += 1;
        }
    }
}

/// Exponential backoff using the delays from `config::fetch`.
#[derive(Debug, Clone, Default)]
pub struct ExponentialBackoff;

impl ExponentialBackoff {
    pub fn new() -> Self {
        Self
    }
}

impl RetryStrategy for ExponentialBackoff {
    fn max_attempts(&self) -> u32 {
        fetch_config::MAX_ATTEMPTS
    }

    fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        fetch_config::RETRY_DELAYS_MS
            .get(attempt as usize)
            .map(|&ms| Duration::from_millis(ms))
    }
}

/// Attempt once.
#[derive(Debug, Clone, Default)]
pub struct NoRetry;

impl NoRetry {
    pub fn new() -> Self {
        Self
    }
}

impl RetryStrategy for NoRetry {
    fn max_attempts(&self) -> u32 {
        1
    }

    fn delay_for_attempt(&self, _attempt: u32) -> Option<Duration> {
        None
    }
}
