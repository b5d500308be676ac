//! # Retry Policy
//!
//! Fixed-delay retry for fallible async operations.
//!
//! The FX lookup makes at most two attempts with a short pause between
//! them. The policy keeps every error it saw so callers can tell a run of
//! breaker rejections apart from real upstream failures.

use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default pause between attempts in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 100;

/// All attempts failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("gave up after {attempts} attempt(s): {last}")]
pub struct RetryExhausted<E> {
    attempts: u32,
    previous: Vec<E>,
    last: E,
}

impl<E> RetryExhausted<E> {
    /// Returns how many attempts were made.
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Returns the error of the final attempt.
    #[inline]
    #[must_use]
    pub fn last(&self) -> &E {
        &self.last
    }

    /// Returns true if every attempt failed with an error matching `predicate`.
    pub fn all(&self, mut predicate: impl FnMut(&E) -> bool) -> bool {
        self.previous.iter().all(&mut predicate) && predicate(&self.last)
    }

    /// Consumes self and returns the final error.
    #[must_use]
    pub fn into_last(self) -> E {
        self.last
    }
}

/// Fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_retry(Duration::from_millis(DEFAULT_RETRY_DELAY_MS))
    }
}

impl RetryPolicy {
    /// Creates a policy. Zero attempts is treated as one.
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// One initial attempt plus one retry.
    #[must_use]
    pub fn single_retry(delay: Duration) -> Self {
        Self::new(2, delay)
    }

    /// Returns the attempt limit.
    #[inline]
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the pause between attempts.
    #[inline]
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `operation` until it succeeds or the attempts run out.
    ///
    /// The operation receives the 1-based attempt number.
    ///
    /// # Errors
    ///
    /// Returns [`RetryExhausted`] holding every error once the last attempt
    /// fails.
    pub async fn run<T, E, F, Fut>(
        &self,
        label: &str,
        mut operation: F,
    ) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let mut previous = Vec::new();
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation = label, attempt, "succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) if attempt < self.max_attempts => {
                    warn!(
                        operation = label,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
                        error = %error,
                        "attempt failed, retrying"
                    );
                    previous.push(error);
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(last) => {
                    return Err(RetryExhausted {
                        attempts: attempt,
                        previous,
                        last,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn first_success_makes_one_attempt() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = RetryPolicy::default()
            .run("test", |_| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(5)
            })
            .await;
        assert_eq!(result.unwrap(), 5);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_once_after_delay() {
        let start = tokio::time::Instant::now();
        let result = RetryPolicy::default()
            .run("test", |attempt| async move {
                if attempt == 1 {
                    Err("first".to_string())
                } else {
                    Ok(attempt)
                }
            })
            .await;
        assert_eq!(result.unwrap(), 2);
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_keeps_all_errors() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = RetryPolicy::default()
            .run("test", |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Err(format!("failure {attempt}")) }
            })
            .await;
        let exhausted = result.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(exhausted.attempts(), 2);
        assert_eq!(exhausted.last(), "failure 2");
        assert!(exhausted.all(|e| e.starts_with("failure")));
        assert!(!exhausted.all(|e| e.ends_with('2')));
        assert_eq!(exhausted.into_last(), "failure 2");
    }

    #[test]
    fn zero_attempts_means_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
    }
}
