//! # Circuit Breaker
//!
//! Failure-counting guard around an asynchronous upstream call.
//!
//! The breaker moves through three states:
//!
//! ```text
//!            max_failures consecutive failures
//!   Closed ───────────────────────────────────▶ Open
//!     ▲                                          │
//!     │ trial succeeds                           │ reset_timeout elapsed
//!     │                                          ▼
//!     └──────────────────────────────────── HalfOpen
//!                 trial fails: back to Open, timer restarts
//! ```
//!
//! Every admitted call is bounded by `call_timeout`; a call that does not
//! finish in time counts as a failure. While open, calls are rejected
//! immediately without invoking the operation and without touching any
//! counter. In half-open exactly one trial call is admitted at a time.
//!
//! # Examples
//!
//! ```
//! use loyalty_quote::application::services::circuit_breaker::{
//!     CircuitBreaker, CircuitBreakerConfig, CircuitState,
//! };
//!
//! # tokio_test::block_on(async {
//! let breaker = CircuitBreaker::new("fx-service-cb", CircuitBreakerConfig::default());
//! let value: Result<u32, _> = breaker.call(|| async { Ok::<_, String>(7) }).await;
//! assert_eq!(value.unwrap(), 7);
//! assert_eq!(breaker.state(), CircuitState::Closed);
//! # });
//! ```

use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Default number of consecutive failures that opens the breaker.
pub const DEFAULT_MAX_FAILURES: u32 = 2;

/// Default per-call deadline in milliseconds.
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 800;

/// Default open-state duration in milliseconds.
pub const DEFAULT_RESET_TIMEOUT_MS: u64 = 3000;

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircuitState {
    /// Calls pass through and failures are counted.
    Closed,
    /// Calls are rejected without being attempted.
    Open,
    /// A single trial call decides whether to close or re-open.
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "CLOSED"),
            Self::Open => write!(f, "OPEN"),
            Self::HalfOpen => write!(f, "HALF_OPEN"),
        }
    }
}

/// Breaker tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the breaker.
    pub max_failures: u32,
    /// Deadline applied to every admitted call.
    pub call_timeout: Duration,
    /// How long the breaker stays open before admitting a trial.
    pub reset_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            max_failures: DEFAULT_MAX_FAILURES,
            call_timeout: Duration::from_millis(DEFAULT_CALL_TIMEOUT_MS),
            reset_timeout: Duration::from_millis(DEFAULT_RESET_TIMEOUT_MS),
        }
    }
}

impl CircuitBreakerConfig {
    /// Creates a config from millisecond values.
    #[must_use]
    pub fn from_millis(max_failures: u32, call_timeout_ms: u64, reset_timeout_ms: u64) -> Self {
        Self {
            max_failures,
            call_timeout: Duration::from_millis(call_timeout_ms),
            reset_timeout: Duration::from_millis(reset_timeout_ms),
        }
    }
}

/// Outcome of a call that did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitBreakerError<E> {
    /// Rejected without invoking the operation.
    #[error("circuit breaker '{breaker}' is open")]
    Open {
        /// Breaker name.
        breaker: String,
    },

    /// The operation did not finish within the call deadline.
    #[error("call timed out after {timeout_ms}ms")]
    Timeout {
        /// Deadline in milliseconds.
        timeout_ms: u64,
    },

    /// The operation itself failed.
    #[error("{0}")]
    Call(#[source] E),
}

impl<E> CircuitBreakerError<E> {
    /// Returns true if the breaker rejected the call without attempting it.
    #[inline]
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Returns true if the call hit the breaker's deadline.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[derive(Debug)]
struct BreakerState {
    mode: CircuitState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    trial_in_flight: bool,
}

impl BreakerState {
    fn closed() -> Self {
        Self {
            mode: CircuitState::Closed,
            consecutive_failures: 0,
            opened_at: None,
            trial_in_flight: false,
        }
    }
}

/// Admission ticket for one call. Releases a half-open trial slot if the
/// call is dropped before reporting an outcome.
struct Permit<'a> {
    breaker: &'a CircuitBreaker,
    trial: bool,
    settled: bool,
}

impl Permit<'_> {
    fn success(mut self) {
        self.settled = true;
        self.breaker.on_success();
    }

    fn failure(mut self) {
        self.settled = true;
        self.breaker.on_failure();
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        if !self.settled && self.trial {
            self.breaker.on_abandoned_trial();
        }
    }
}

/// Circuit breaker shared by all calls to one upstream.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    state: Mutex<BreakerState>,
}

impl CircuitBreaker {
    /// Creates a closed breaker.
    #[must_use]
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            state: Mutex::new(BreakerState::closed()),
        }
    }

    /// Returns the breaker name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the breaker config.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Returns the current state.
    ///
    /// An open breaker whose reset timeout has elapsed reports
    /// [`CircuitState::HalfOpen`]; the transition is committed by the next
    /// admitted call.
    #[must_use]
    pub fn state(&self) -> CircuitState {
        let state = self.state.lock();
        match state.mode {
            CircuitState::Open if self.reset_elapsed(&state) => CircuitState::HalfOpen,
            mode => mode,
        }
    }

    /// Returns the current consecutive failure count.
    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.state.lock().consecutive_failures
    }

    /// Runs `operation` under the breaker.
    ///
    /// # Errors
    ///
    /// - [`CircuitBreakerError::Open`] when the call is rejected
    /// - [`CircuitBreakerError::Timeout`] when the call exceeds `call_timeout`
    /// - [`CircuitBreakerError::Call`] when the operation fails
    pub async fn call<T, E, F, Fut>(&self, operation: F) -> Result<T, CircuitBreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let Some(permit) = self.try_acquire() else {
            debug!(breaker = %self.name, "call rejected by open circuit breaker");
            return Err(CircuitBreakerError::Open {
                breaker: self.name.clone(),
            });
        };

        match tokio::time::timeout(self.config.call_timeout, operation()).await {
            Ok(Ok(value)) => {
                permit.success();
                Ok(value)
            }
            Ok(Err(error)) => {
                permit.failure();
                Err(CircuitBreakerError::Call(error))
            }
            Err(_) => {
                permit.failure();
                Err(CircuitBreakerError::Timeout {
                    timeout_ms: duration_millis(self.config.call_timeout),
                })
            }
        }
    }

    fn reset_elapsed(&self, state: &BreakerState) -> bool {
        state
            .opened_at
            .is_some_and(|opened| opened.elapsed() >= self.config.reset_timeout)
    }

    fn try_acquire(&self) -> Option<Permit<'_>> {
        let mut state = self.state.lock();
        match state.mode {
            CircuitState::Closed => Some(Permit {
                breaker: self,
                trial: false,
                settled: false,
            }),
            CircuitState::Open if self.reset_elapsed(&state) => {
                state.mode = CircuitState::HalfOpen;
                state.trial_in_flight = true;
                info!(breaker = %self.name, "circuit breaker half-open, admitting trial call");
                Some(Permit {
                    breaker: self,
                    trial: true,
                    settled: false,
                })
            }
            CircuitState::HalfOpen if !state.trial_in_flight => {
                state.trial_in_flight = true;
                Some(Permit {
                    breaker: self,
                    trial: true,
                    settled: false,
                })
            }
            CircuitState::Open | CircuitState::HalfOpen => None,
        }
    }

    fn on_success(&self) {
        let mut state = self.state.lock();
        if state.mode != CircuitState::Closed {
            info!(breaker = %self.name, "circuit breaker closed");
        }
        *state = BreakerState::closed();
    }

    fn on_failure(&self) {
        let mut state = self.state.lock();
        match state.mode {
            CircuitState::Closed => {
                state.consecutive_failures = state.consecutive_failures.saturating_add(1);
                if state.consecutive_failures >= self.config.max_failures {
                    state.mode = CircuitState::Open;
                    state.opened_at = Some(Instant::now());
                    warn!(
                        breaker = %self.name,
                        failures = state.consecutive_failures,
                        reset_timeout_ms = duration_millis(self.config.reset_timeout),
                        "circuit breaker opened"
                    );
                }
            }
            CircuitState::HalfOpen => {
                state.mode = CircuitState::Open;
                state.opened_at = Some(Instant::now());
                state.trial_in_flight = false;
                warn!(breaker = %self.name, "trial call failed, circuit breaker re-opened");
            }
            // A call admitted while closed can finish after others opened the breaker.
            CircuitState::Open => {}
        }
    }

    fn on_abandoned_trial(&self) {
        let mut state = self.state.lock();
        if state.mode == CircuitState::HalfOpen {
            state.trial_in_flight = false;
            debug!(breaker = %self.name, "trial call abandoned");
        }
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
